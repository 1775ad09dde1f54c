//! Local tool relay loop.
//!
//! Each turn streams one completion. When the model asks for tools, the
//! calls are appended to the conversation as an assistant message, every
//! call naming a registered [`LocalTool`](crate::tools::LocalTool) is run
//! and its result appended as a `tool` message, and the next turn starts.
//! A turn with no tool calls ends the loop.

mod accumulate;

pub use accumulate::{ToolCallAccumulator, TurnOutcome, PLACEHOLDER_TOOL_NAME};

use crate::client::ChatStreamer;
use crate::tools::LocalToolRegistry;
use crate::types::{Message, ToolDefinition};
use crate::{Error, ErrorContext, Result};
use futures::StreamExt;
use std::io::Write;
use tracing::{debug, warn};

pub const DEFAULT_MAX_TURNS: usize = 8;

/// Whether the loop should issue another request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayStep {
    Continue,
    Done,
}

/// Final state of a finished loop.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayOutcome {
    /// Full conversation, starting with the caller's messages.
    pub messages: Vec<Message>,
    /// Requests issued.
    pub turns: usize,
    /// Content streamed by the last turn.
    pub final_content: String,
}

pub struct RelayLoop {
    tools: Vec<ToolDefinition>,
    registry: LocalToolRegistry,
    max_turns: usize,
}

impl RelayLoop {
    /// `tools` is sent with every request; `registry` holds the ones run
    /// locally.
    pub fn new(tools: Vec<ToolDefinition>, registry: LocalToolRegistry) -> Self {
        Self {
            tools,
            registry,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns.max(1);
        self
    }

    /// Fold a turn's outcome into the conversation.
    pub fn apply(&self, messages: &mut Vec<Message>, outcome: TurnOutcome) -> RelayStep {
        let calls = match outcome {
            TurnOutcome::ToolCalls(calls) => calls,
            TurnOutcome::Content(_) | TurnOutcome::Empty => return RelayStep::Done,
        };

        messages.push(Message::assistant_tool_calls(calls.clone()));
        for call in &calls {
            match self.registry.get(call.name()) {
                Some(tool) => {
                    let result = tool.call(call.arguments());
                    messages.push(Message::tool_result(call.id.clone(), result));
                }
                None => {
                    // Remote tools are run by the gateway itself.
                    warn!(tool = %call.name(), id = %call.id, "no local tool registered, skipping");
                }
            }
        }
        RelayStep::Continue
    }

    /// Run until a turn ends without tool calls. Content is written to
    /// `out` as it streams.
    pub async fn run<S, W>(
        &self,
        streamer: &S,
        messages: Vec<Message>,
        out: &mut W,
    ) -> Result<RelayOutcome>
    where
        S: ChatStreamer + ?Sized,
        W: Write,
    {
        let mut messages = messages;

        for turn in 1..=self.max_turns {
            debug!(turn, messages = messages.len(), "relay turn");

            let mut stream = streamer.stream_chat(&messages, &self.tools, None).await?;
            let mut acc = ToolCallAccumulator::new();
            while let Some(chunk) = stream.next().await {
                let chunk = chunk?;
                if let Some(content) = chunk.content() {
                    write!(out, "{}", content)?;
                    out.flush()?;
                }
                acc.observe(&chunk);
            }

            let outcome = acc.finish();
            let final_content = match &outcome {
                TurnOutcome::Content(text) => text.clone(),
                _ => String::new(),
            };
            if self.apply(&mut messages, outcome) == RelayStep::Done {
                return Ok(RelayOutcome {
                    messages,
                    turns: turn,
                    final_content,
                });
            }
        }

        Err(Error::validation_with_context(
            format!("relay loop exceeded {} turns", self.max_turns),
            ErrorContext::new().with_source("relay_loop"),
        ))
    }
}
