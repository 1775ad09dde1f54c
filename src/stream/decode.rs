//! Server-sent events decoder for `chat.completion.chunk` streams.
//!
//! - frames end at a blank line; lines end with LF, CRLF or a lone CR
//! - `:` comment lines and non-`data` fields are ignored
//! - several `data:` lines in one frame are joined with `\n`
//! - `[DONE]` ends the stream
//! - an `{"error": ...}` frame or undecodable JSON yields one
//!   [`Error::Stream`](crate::Error::Stream) and ends the stream

use crate::types::StreamChunk;
use crate::{BoxStream, Error, ErrorContext, Result};
use bytes::Bytes;
use futures::{stream, StreamExt};
use serde_json::Value;
use tracing::{trace, warn};

const DELIMITER: &[u8] = b"\n\n";

#[derive(Debug, Clone)]
pub struct SseDecoder {
    done_signal: String,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self {
            done_signal: "[DONE]".to_string(),
        }
    }
}

/// What a single frame turned out to be.
#[derive(Debug)]
enum Frame {
    Chunk(StreamChunk),
    Done,
    Skip,
}

struct DecodeState {
    input: BoxStream<'static, Bytes>,
    /// Line endings already normalised to LF.
    buf: Vec<u8>,
    /// Bytes of `buf` known not to start a delimiter.
    scanned: usize,
    /// The previous read ended in CR, so a leading LF belongs to it.
    pending_cr: bool,
    finished: bool,
}

impl DecodeState {
    fn push(&mut self, bytes: &[u8]) {
        self.buf.reserve(bytes.len());
        for &b in bytes {
            match b {
                b'\r' => {
                    self.buf.push(b'\n');
                    self.pending_cr = true;
                }
                b'\n' if self.pending_cr => self.pending_cr = false,
                _ => {
                    self.buf.push(b);
                    self.pending_cr = false;
                }
            }
        }
    }

    /// End of the next complete frame, resuming where the last scan stopped.
    fn next_delimiter(&mut self) -> Option<usize> {
        let found = find(&self.buf[self.scanned..], DELIMITER).map(|i| i + self.scanned);
        if found.is_none() {
            self.scanned = self.buf.len().saturating_sub(DELIMITER.len() - 1);
        }
        found
    }
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `input` lazily; chunks come out in arrival order.
    pub fn decode_stream(&self, input: BoxStream<'static, Bytes>) -> BoxStream<'static, StreamChunk> {
        let done_signal = self.done_signal.clone();
        let state = DecodeState {
            input,
            buf: Vec::new(),
            scanned: 0,
            pending_cr: false,
            finished: false,
        };

        let stream = stream::unfold(state, move |mut state| {
            let done_signal = done_signal.clone();
            async move {
                if state.finished {
                    return None;
                }
                loop {
                    // Emit the next complete frame, if any.
                    if let Some(idx) = state.next_delimiter() {
                        let frame: Vec<u8> = state.buf.drain(..idx + DELIMITER.len()).collect();
                        state.scanned = 0;
                        match parse_frame(&frame[..idx], &done_signal) {
                            Ok(Frame::Chunk(chunk)) => return Some((Ok(chunk), state)),
                            Ok(Frame::Done) => return None,
                            Ok(Frame::Skip) => continue,
                            Err(e) => {
                                state.finished = true;
                                return Some((Err(e), state));
                            }
                        }
                    }

                    match state.input.next().await {
                        Some(Ok(bytes)) => state.push(&bytes),
                        Some(Err(e)) => {
                            state.finished = true;
                            return Some((Err(e), state));
                        }
                        None => {
                            // EOF: the last frame may lack its blank line.
                            state.finished = true;
                            let rest = std::mem::take(&mut state.buf);
                            return match parse_frame(&rest, &done_signal) {
                                Ok(Frame::Chunk(chunk)) => Some((Ok(chunk), state)),
                                Ok(Frame::Done) | Ok(Frame::Skip) => None,
                                Err(e) => Some((Err(e), state)),
                            };
                        }
                    }
                }
            }
        });

        Box::pin(stream)
    }
}

/// Decode with the default `[DONE]` terminator.
pub fn decode_chunks(input: BoxStream<'static, Bytes>) -> BoxStream<'static, StreamChunk> {
    SseDecoder::new().decode_stream(input)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_frame(raw: &[u8], done_signal: &str) -> Result<Frame> {
    let text = String::from_utf8_lossy(raw);
    let mut data_lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.is_empty() || line.starts_with(':') {
            continue;
        }
        if let Some(value) = line.strip_prefix("data:") {
            data_lines.push(value.strip_prefix(' ').unwrap_or(value));
        } else if line.trim_start().starts_with('{') || line.trim() == done_signal {
            // Some gateways skip the `data:` prefix entirely.
            data_lines.push(line);
        } else {
            trace!(line = %line, "ignoring sse field");
        }
    }

    if data_lines.is_empty() {
        return Ok(Frame::Skip);
    }
    let payload = data_lines.join("\n");
    let payload = payload.trim();
    if payload.is_empty() {
        return Ok(Frame::Skip);
    }
    if payload == done_signal {
        return Ok(Frame::Done);
    }

    let value: Value = serde_json::from_str(payload).map_err(|e| {
        warn!(error = %e, "undecodable stream frame");
        Error::stream_with_context(
            "invalid JSON in stream frame",
            ErrorContext::new()
                .with_details(e.to_string())
                .with_source("sse_decoder"),
        )
    })?;

    if let Some(err) = value.get("error") {
        let message = err
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| err.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());
        return Err(Error::stream_with_context(
            message,
            ErrorContext::new().with_source("sse_decoder"),
        ));
    }

    serde_json::from_value::<StreamChunk>(value)
        .map(Frame::Chunk)
        .map_err(|e| {
            Error::stream_with_context(
                "unexpected chunk shape",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("sse_decoder"),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    fn input(parts: &[&str]) -> BoxStream<'static, Bytes> {
        let parts: Vec<Result<Bytes>> = parts
            .iter()
            .map(|p| Ok(Bytes::from(p.to_string())))
            .collect();
        Box::pin(stream::iter(parts))
    }

    async fn collect(parts: &[&str]) -> Vec<Result<StreamChunk>> {
        decode_chunks(input(parts)).collect().await
    }

    fn content_frame(text: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"index\":0,\"delta\":{{\"content\":{}}}}}]}}\n\n",
            serde_json::to_string(text).unwrap()
        )
    }

    #[tokio::test]
    async fn test_frames_in_order_until_done() {
        let a = content_frame("Hello");
        let b = content_frame(", world");
        let chunks: Vec<StreamChunk> = decode_chunks(input(&[&a, &b, "data: [DONE]\n\n", &content_frame("late")]))
            .try_collect()
            .await
            .unwrap();
        let texts: Vec<_> = chunks.iter().filter_map(|c| c.content()).collect();
        assert_eq!(texts, vec!["Hello", ", world"]);
    }

    #[tokio::test]
    async fn test_frame_split_across_reads() {
        let frame = content_frame("🧪 split");
        let bytes = frame.as_bytes();
        // Split inside the multi-byte emoji.
        let cut = frame.find('🧪').unwrap() + 2;
        let parts: Vec<Result<Bytes>> = vec![
            Ok(Bytes::copy_from_slice(&bytes[..cut])),
            Ok(Bytes::copy_from_slice(&bytes[cut..])),
        ];
        let chunks: Vec<StreamChunk> = decode_chunks(Box::pin(stream::iter(parts)))
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), Some("🧪 split"));
    }

    #[tokio::test]
    async fn test_crlf_comments_and_multiline_data() {
        let body = ": keep-alive\r\n\r\n\
                    event: message\r\n\
                    data: {\"choices\":[{\"index\":0,\r\n\
                    data: \"delta\":{\"content\":\"hi\"}}]}\r\n\r\n\
                    data: [DONE]\r\n\r\n";
        let chunks: Vec<StreamChunk> = decode_chunks(input(&[body])).try_collect().await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), Some("hi"));
    }

    #[tokio::test]
    async fn test_lone_cr_line_endings() {
        let body = format!(
            "{}\r\r{}\r\rdata: [DONE]\r\r",
            content_frame("one").trim_end(),
            content_frame("two").trim_end()
        );
        let chunks: Vec<StreamChunk> = decode_chunks(input(&[&body])).try_collect().await.unwrap();
        let texts: Vec<_> = chunks.iter().filter_map(|c| c.content()).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }

    #[tokio::test]
    async fn test_crlf_split_between_reads() {
        let frame = content_frame("x").trim_end().to_string();
        let chunks: Vec<StreamChunk> =
            decode_chunks(input(&[&frame, "\r", "\n\r", "\n", &content_frame("y")]))
                .try_collect()
                .await
                .unwrap();
        let texts: Vec<_> = chunks.iter().filter_map(|c| c.content()).collect();
        assert_eq!(texts, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_delimiter_split_after_many_small_reads() {
        let frame = content_frame("a long answer, streamed byte by byte");
        let parts: Vec<String> = frame.chars().map(String::from).collect();
        let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
        let chunks: Vec<StreamChunk> = decode_chunks(input(&parts)).try_collect().await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content(), Some("a long answer, streamed byte by byte"));
    }

    #[tokio::test]
    async fn test_error_frame_ends_stream() {
        let results = collect(&[
            &content_frame("partial"),
            "data: {\"error\":{\"message\":\"tool failed\"}}\n\n",
            &content_frame("never"),
        ])
        .await;
        assert_eq!(results.len(), 2);
        assert!(results[0].is_ok());
        match &results[1] {
            Err(Error::Stream { message, .. }) => assert_eq!(message, "tool failed"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_a_stream_error() {
        let results = collect(&["data: {not json\n\n"]).await;
        assert_eq!(results.len(), 1);
        assert!(matches!(results[0], Err(Error::Stream { .. })));
    }

    #[tokio::test]
    async fn test_eof_without_done_flushes_last_frame() {
        let body = "data: {\"choices\":[{\"index\":0,\"finish_reason\":\"stop\"}]}";
        let chunks: Vec<StreamChunk> = decode_chunks(input(&[body])).try_collect().await.unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].finish_reason(), Some("stop"));
    }

    #[tokio::test]
    async fn test_empty_body_is_empty_stream() {
        assert!(collect(&[]).await.is_empty());
    }
}
