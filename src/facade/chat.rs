use crate::client::{AgcClient, ChatStreamer};
use crate::config::AgcConfig;
use crate::tools::IntoToolDefinition;
use crate::types::{Message, StreamChunk, ToolDefinition};
use crate::{BoxStream, Result};
use futures::StreamExt;
use serde_json::Value;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// Provider-schema form of any tool declaration.
pub fn convert_to_openai_tool<T: IntoToolDefinition + ?Sized>(tool: &T) -> ToolDefinition {
    tool.to_tool_definition()
}

/// One tool-call fragment, flattened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallChunk {
    pub id: Option<String>,
    pub name: Option<String>,
    pub args: Option<String>,
    pub index: Option<u32>,
}

/// Message-level view of a streamed chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageChunk {
    /// Text fragment; empty when the chunk carried none.
    pub content: String,
    pub tool_calls: Vec<ToolCallChunk>,
    pub finish_reason: Option<String>,
}

impl From<StreamChunk> for MessageChunk {
    fn from(chunk: StreamChunk) -> Self {
        let tool_calls = chunk
            .tool_calls()
            .unwrap_or_default()
            .iter()
            .map(|d| ToolCallChunk {
                id: d.id().map(str::to_string),
                name: d.name().map(str::to_string),
                args: d.arguments().map(str::to_string),
                index: d.index,
            })
            .collect();
        Self {
            content: chunk.content().unwrap_or_default().to_string(),
            tool_calls,
            finish_reason: chunk.finish_reason().map(str::to_string),
        }
    }
}

/// A chat model with tools bound to it.
pub struct ChatModel<S: ChatStreamer + ?Sized = AgcClient> {
    streamer: Arc<S>,
    tools: Vec<ToolDefinition>,
    tool_choice: Option<Value>,
}

impl<S: ChatStreamer + ?Sized> Clone for ChatModel<S> {
    fn clone(&self) -> Self {
        Self {
            streamer: Arc::clone(&self.streamer),
            tools: self.tools.clone(),
            tool_choice: self.tool_choice.clone(),
        }
    }
}

impl ChatModel<AgcClient> {
    /// Model talking to the configured gateway.
    pub fn from_config(config: &AgcConfig) -> Result<Self> {
        Ok(Self::new(Arc::new(AgcClient::new(config)?)))
    }
}

impl<S: ChatStreamer + ?Sized> ChatModel<S> {
    pub fn new(streamer: Arc<S>) -> Self {
        Self {
            streamer,
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    /// Copy of this model with `tools` bound, replacing earlier bindings.
    pub fn bind_tools<T: IntoToolDefinition>(&self, tools: &[T]) -> Self {
        Self {
            tools: tools.iter().map(convert_to_openai_tool).collect(),
            ..self.clone()
        }
    }

    /// `None` leaves the choice to the gateway.
    pub fn tool_choice(mut self, tool_choice: Option<Value>) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    pub fn tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    pub fn model_name(&self) -> String {
        self.streamer.model().to_string()
    }

    pub async fn stream(&self, messages: &[Message]) -> Result<BoxStream<'static, MessageChunk>> {
        let chunks = self
            .streamer
            .stream_chat(messages, &self.tools, self.tool_choice.as_ref())
            .await?;
        Ok(Box::pin(chunks.map(|item| item.map(MessageChunk::from))))
    }
}

/// Prints message chunks to `out` as they stream.
pub struct MessageChunkPrinter<W: Write> {
    out: W,
}

impl<W: Write> MessageChunkPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print_chunk(&mut self, chunk: &MessageChunk) -> Result<()> {
        if !chunk.content.is_empty() {
            write!(self.out, "{}", chunk.content)?;
            self.out.flush()?;
        }
        if !chunk.tool_calls.is_empty() {
            writeln!(self.out, "\n🔧 [Tool calls detected]")?;
            for call in &chunk.tool_calls {
                writeln!(
                    self.out,
                    "   ⚙️  {}",
                    call.name.as_deref().unwrap_or("Unknown tool")
                )?;
            }
        }
        Ok(())
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{}", text)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Bound-model counterpart of [`run_single_turn`](crate::processor::run_single_turn).
pub async fn run_bound_turn<S, W>(
    model: &ChatModel<S>,
    title: &str,
    messages: &[Message],
    out: W,
) -> Result<W>
where
    S: ChatStreamer + ?Sized,
    W: Write,
{
    let mut printer = MessageChunkPrinter::new(out);
    printer.line(title)?;
    printer.line(&format!("🤖 Model: {}", model.model_name()))?;
    printer.line("--- 🌊 Streaming Response ---")?;

    debug!(tools = model.tools().len(), "streaming bound turn");
    let mut stream = model.stream(messages).await?;
    while let Some(chunk) = stream.next().await {
        printer.print_chunk(&chunk?)?;
    }

    printer.line("\n--- ✅ Streaming Complete ---")?;
    Ok(printer.into_inner())
}
