use crate::types::{StreamChunk, ToolCall};

pub const PLACEHOLDER_TOOL_NAME: &str = "unknown_tool";

/// What one streamed turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// At least one tool-call fragment arrived. Takes precedence over any
    /// content seen in the same turn.
    ToolCalls(Vec<ToolCall>),
    /// Only content arrived; the concatenated text.
    Content(String),
    /// Neither content nor tool calls.
    Empty,
}

#[derive(Debug, Default)]
struct PartialCall {
    index: Option<u32>,
    id: Option<String>,
    name: Option<String>,
    arguments: String,
}

/// Collects one turn's tool-call fragments into complete [`ToolCall`]s.
///
/// Fragments are grouped by their `index`; a fragment without one belongs
/// to the most recent call. Argument fragments are concatenated in arrival
/// order with no separator and are never parsed here.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    calls: Vec<PartialCall>,
    content: String,
    saw_content: bool,
    saw_tool_call: bool,
}

impl ToolCallAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, chunk: &StreamChunk) {
        if let Some(content) = chunk.content() {
            self.saw_content = true;
            self.content.push_str(content);
        }

        let Some(deltas) = chunk.tool_calls() else {
            return;
        };
        for delta in deltas {
            self.saw_tool_call = true;
            let slot = self.slot_for(delta.index);
            if let Some(id) = delta.id() {
                slot.id = Some(id.to_string());
            }
            if let Some(name) = delta.name() {
                slot.name = Some(name.to_string());
            }
            if let Some(fragment) = delta.arguments() {
                slot.arguments.push_str(fragment);
            }
        }
    }

    fn slot_for(&mut self, index: Option<u32>) -> &mut PartialCall {
        let pos = match index {
            Some(i) => self
                .calls
                .iter()
                .position(|c| c.index == Some(i))
                .or_else(|| self.adopt_unindexed(i)),
            None if !self.calls.is_empty() => Some(self.calls.len() - 1),
            None => None,
        };
        let pos = match pos {
            Some(pos) => pos,
            None => {
                self.calls.push(PartialCall {
                    index,
                    ..Default::default()
                });
                self.calls.len() - 1
            }
        };
        &mut self.calls[pos]
    }

    /// An index-less fragment opened the latest call; the first indexed
    /// fragment with an unseen index continues it.
    fn adopt_unindexed(&mut self, index: u32) -> Option<usize> {
        let last = self.calls.last_mut()?;
        if last.index.is_some() {
            return None;
        }
        last.index = Some(index);
        Some(self.calls.len() - 1)
    }

    /// Missing ids become `tool_call_{n}` (1-based position in the turn);
    /// missing names become `unknown_tool`.
    pub fn finish(self) -> TurnOutcome {
        if self.saw_tool_call {
            let calls = self
                .calls
                .into_iter()
                .enumerate()
                .map(|(i, c)| {
                    ToolCall::new(
                        c.id.unwrap_or_else(|| format!("tool_call_{}", i + 1)),
                        c.name.unwrap_or_else(|| PLACEHOLDER_TOOL_NAME.to_string()),
                        c.arguments,
                    )
                })
                .collect();
            TurnOutcome::ToolCalls(calls)
        } else if self.saw_content {
            TurnOutcome::Content(self.content)
        } else {
            TurnOutcome::Empty
        }
    }
}
