//! Minimal prelude for application code.

pub use crate::client::{AgcClient, ChatStreamer};
pub use crate::config::{AgcConfig, ModelRef};
pub use crate::conversation::Scenario;
pub use crate::facade::chat::{convert_to_openai_tool, ChatModel, MessageChunk, ToolCallChunk};
pub use crate::tools::{IntoToolDefinition, TypedTool};
pub use crate::types::{Message, MessageRole, ToolDefinition};
