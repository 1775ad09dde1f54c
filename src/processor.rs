//! Console rendering of streamed chunks.

use crate::client::ChatStreamer;
use crate::types::{Message, StreamChunk, ToolDefinition};
use crate::Result;
use futures::StreamExt;
use std::io::Write;
use tracing::debug;

/// Writes each chunk's observable parts to `out` as soon as it arrives.
///
/// Only the first choice is looked at. Per chunk, in this order:
/// content (no newline, flushed), a tool-call notice with one line per
/// delta that carries a function, then the finish reason.
pub struct ChunkPrinter<W: Write> {
    out: W,
}

impl<W: Write> ChunkPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print_chunk(&mut self, chunk: &StreamChunk) -> Result<()> {
        let Some(choice) = chunk.first_choice() else {
            return Ok(());
        };

        if let Some(content) = choice.content() {
            write!(self.out, "{}", content)?;
            self.out.flush()?;
        }

        if let Some(calls) = choice.tool_calls() {
            writeln!(self.out, "\n🔧 [Tool calls detected]")?;
            for call in calls.iter().filter(|c| c.function.is_some()) {
                writeln!(self.out, "   ⚙️  {}", call.name().unwrap_or("None"))?;
            }
        }

        if let Some(reason) = choice.finish_reason.as_deref() {
            writeln!(self.out, "\n🏁 [Finish: {}]", reason)?;
        }

        Ok(())
    }

    /// Write a whole line outside the chunk flow (banners, notices).
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// One streamed request, printed chunk by chunk between the standard
/// header and footer. Returns the sink so callers can inspect it.
pub async fn run_single_turn<S, W>(
    streamer: &S,
    title: &str,
    messages: &[Message],
    tools: &[ToolDefinition],
    out: W,
) -> Result<W>
where
    S: ChatStreamer + ?Sized,
    W: Write,
{
    let mut printer = ChunkPrinter::new(out);
    printer.line(title)?;
    printer.line(&format!("🤖 Model: {}", streamer.model()))?;
    printer.line("--- 🌊 Streaming Response ---")?;

    let mut stream = streamer.stream_chat(messages, tools, None).await?;
    let mut count = 0usize;
    while let Some(chunk) = stream.next().await {
        printer.print_chunk(&chunk?)?;
        count += 1;
    }
    debug!(chunks = count, "stream complete");

    printer.line("\n--- ✅ Streaming Complete ---")?;
    Ok(printer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ScriptedStreamer;
    use crate::config::ModelRef;
    use crate::types::{ChunkChoice, ChunkDelta, FunctionDelta, ToolCallDelta};

    fn render(chunks: &[StreamChunk]) -> String {
        let mut printer = ChunkPrinter::new(Vec::new());
        for chunk in chunks {
            printer.print_chunk(chunk).unwrap();
        }
        String::from_utf8(printer.into_inner()).unwrap()
    }

    #[test]
    fn test_content_concatenates_without_newlines() {
        let out = render(&[StreamChunk::text("Mg + "), StreamChunk::text("O2")]);
        assert_eq!(out, "Mg + O2");
    }

    #[test]
    fn test_tool_call_then_finish() {
        let out = render(&[
            StreamChunk::tool_call(0, Some("call_1"), Some("allbirds_mcp_tool_action_YWxsYmlyZH"), None),
            StreamChunk::tool_call(0, None, None, Some("{\"q\":1}")),
            StreamChunk::finish("tool_calls"),
        ]);
        assert_eq!(
            out,
            "\n🔧 [Tool calls detected]\n   ⚙️  allbirds_mcp_tool_action_YWxsYmlyZH\n\
             \n🔧 [Tool calls detected]\n   ⚙️  None\n\
             \n🏁 [Finish: tool_calls]\n"
        );
    }

    #[test]
    fn test_content_and_tool_call_in_one_chunk() {
        let chunk = StreamChunk {
            choices: vec![ChunkChoice {
                index: 0,
                delta: Some(ChunkDelta {
                    content: Some("Searching".into()),
                    tool_calls: Some(vec![
                        ToolCallDelta {
                            index: Some(0),
                            id: Some("a".into()),
                            function: Some(FunctionDelta {
                                name: Some("x".into()),
                                arguments: None,
                            }),
                        },
                        // No function: no line.
                        ToolCallDelta {
                            index: Some(1),
                            id: Some("b".into()),
                            function: None,
                        },
                    ]),
                    ..Default::default()
                }),
                finish_reason: None,
            }],
            ..Default::default()
        };
        assert_eq!(render(&[chunk]), "Searching\n🔧 [Tool calls detected]\n   ⚙️  x\n");
    }

    #[test]
    fn test_single_turn_frames_output() {
        let streamer = ScriptedStreamer::new(ModelRef::parse("openai@gpt-4.1-mini").unwrap())
            .turn(vec![StreamChunk::text("5% off: $95"), StreamChunk::finish("stop")]);

        let out = tokio_test::block_on(run_single_turn(
            &streamer,
            "🔄 title",
            &[Message::user("give discount of 5% on $100")],
            &[],
            Vec::new(),
        ))
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "🔄 title\n🤖 Model: openai@gpt-4.1-mini\n--- 🌊 Streaming Response ---\n\
             5% off: $95\n🏁 [Finish: stop]\n\
             \n--- ✅ Streaming Complete ---\n"
        );
        assert_eq!(streamer.requests()[0].tool_choice, None);
    }

    #[test]
    fn test_stream_error_stops_the_turn() {
        let streamer = ScriptedStreamer::new(ModelRef::parse("openai@gpt-4.1-mini").unwrap())
            .turn_results(vec![Err(crate::Error::stream_with_context(
                "tool failed",
                crate::ErrorContext::new(),
            ))]);
        let result = tokio_test::block_on(run_single_turn(
            &streamer,
            "t",
            &[],
            &[],
            std::io::sink(),
        ));
        assert!(matches!(result, Err(crate::Error::Stream { .. })));
    }

    #[test]
    fn test_chunks_without_choices_or_content_print_nothing() {
        let empty = StreamChunk::default();
        let blank = StreamChunk::text("");
        assert_eq!(render(&[empty, blank]), "");
    }
}
