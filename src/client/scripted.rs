use crate::config::ModelRef;
use crate::types::{Message, StreamChunk, ToolDefinition};
use crate::{BoxStream, Error, ErrorContext, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

use super::core::ChatStreamer;

/// A request as seen by [`ScriptedStreamer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<String>,
    pub tool_choice: Option<Value>,
}

/// In-memory [`ChatStreamer`] that replays one pre-recorded chunk list per
/// request, in order, and records what it was asked.
pub struct ScriptedStreamer {
    model: ModelRef,
    turns: Mutex<VecDeque<Vec<Result<StreamChunk>>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedStreamer {
    pub fn new(model: ModelRef) -> Self {
        Self {
            model,
            turns: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue the chunks for the next unanswered request.
    pub fn turn(self, chunks: Vec<StreamChunk>) -> Self {
        self.turn_results(chunks.into_iter().map(Ok).collect())
    }

    /// Like [`turn`](Self::turn) but items may be errors.
    pub fn turn_results(self, items: Vec<Result<StreamChunk>>) -> Self {
        if let Ok(mut turns) = self.turns.lock() {
            turns.push_back(items);
        }
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChatStreamer for ScriptedStreamer {
    fn model(&self) -> &ModelRef {
        &self.model
    }

    async fn stream_chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: Option<&Value>,
    ) -> Result<BoxStream<'static, StreamChunk>> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                messages: messages.to_vec(),
                tools: tools.iter().map(|t| t.name().to_string()).collect(),
                tool_choice: tool_choice.cloned(),
            });
        }

        let next = self.turns.lock().ok().and_then(|mut t| t.pop_front());
        match next {
            Some(items) => Ok(Box::pin(futures::stream::iter(items))),
            None => Err(Error::stream_with_context(
                "no scripted response left",
                ErrorContext::new().with_source("scripted_streamer"),
            )),
        }
    }
}
