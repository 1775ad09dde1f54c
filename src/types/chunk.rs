//! Streaming chunk types (`chat.completion.chunk` frames)
//!
//! Every nested field is optional on the wire. Accessors collapse the
//! nesting and return `None` for anything absent, so consumers never probe
//! for field presence themselves.

use serde::{Deserialize, Serialize};

/// One server-sent unit of a streaming chat completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<ChunkChoice>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<ChunkDelta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCallDelta>>,
}

/// Fragment of a tool call. Id and name usually arrive once, arguments in
/// many pieces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolCallDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<FunctionDelta>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FunctionDelta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
}

impl StreamChunk {
    /// The single choice every consumer looks at.
    pub fn first_choice(&self) -> Option<&ChunkChoice> {
        self.choices.first()
    }

    /// Non-empty text fragment of the first choice.
    pub fn content(&self) -> Option<&str> {
        self.first_choice().and_then(ChunkChoice::content)
    }

    /// Tool call fragments of the first choice, `None` when there are none.
    pub fn tool_calls(&self) -> Option<&[ToolCallDelta]> {
        self.first_choice().and_then(ChunkChoice::tool_calls)
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.first_choice().and_then(|c| c.finish_reason.as_deref())
    }
}

impl ChunkChoice {
    pub fn content(&self) -> Option<&str> {
        self.delta
            .as_ref()
            .and_then(|d| d.content.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn tool_calls(&self) -> Option<&[ToolCallDelta]> {
        self.delta
            .as_ref()
            .and_then(|d| d.tool_calls.as_deref())
            .filter(|calls| !calls.is_empty())
    }
}

impl ToolCallDelta {
    pub fn name(&self) -> Option<&str> {
        self.function
            .as_ref()
            .and_then(|f| f.name.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn arguments(&self) -> Option<&str> {
        self.function
            .as_ref()
            .and_then(|f| f.arguments.as_deref())
            .filter(|s| !s.is_empty())
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|s| !s.is_empty())
    }
}

// Constructors used to script streams in tests and demos.
impl StreamChunk {
    fn with_delta(delta: ChunkDelta, finish_reason: Option<String>) -> Self {
        Self {
            id: None,
            model: None,
            choices: vec![ChunkChoice {
                index: 0,
                delta: Some(delta),
                finish_reason,
            }],
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::with_delta(
            ChunkDelta {
                content: Some(content.into()),
                ..Default::default()
            },
            None,
        )
    }

    pub fn tool_call(
        index: u32,
        id: Option<&str>,
        name: Option<&str>,
        arguments: Option<&str>,
    ) -> Self {
        let function = if name.is_some() || arguments.is_some() {
            Some(FunctionDelta {
                name: name.map(str::to_string),
                arguments: arguments.map(str::to_string),
            })
        } else {
            None
        };
        Self::with_delta(
            ChunkDelta {
                tool_calls: Some(vec![ToolCallDelta {
                    index: Some(index),
                    id: id.map(str::to_string),
                    function,
                }]),
                ..Default::default()
            },
            None,
        )
    }

    pub fn finish(reason: impl Into<String>) -> Self {
        Self::with_delta(ChunkDelta::default(), Some(reason.into()))
    }
}
