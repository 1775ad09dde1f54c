//! # Types Module
//!
//! Wire types for the OpenAI-compatible chat-completions surface exposed by
//! the AgC gateway.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | Role-tagged conversation entry (system, user, assistant, tool) |
//! | [`ToolDefinition`] | Tool descriptor sent with every request |
//! | [`ToolCall`] | Tool call record carried by an assistant message |
//! | [`StreamChunk`] | One `chat.completion.chunk` frame of a streamed response |
//! | [`ChatCompletionRequest`] | Request body |
//!
//! ## Example
//!
//! ```rust
//! use agc_loop::types::{FunctionDefinition, Message, ToolDefinition};
//!
//! let conversation = vec![
//!     Message::system("You are a discount calculator agent."),
//!     Message::user("Offer $100 sneakers to premium customers."),
//! ];
//!
//! let tool = ToolDefinition::function(
//!     FunctionDefinition::new(
//!         "get_discount_percentage",
//!         serde_json::json!({
//!             "type": "object",
//!             "properties": {"customer_type": {"type": "string"}}
//!         }),
//!     )
//!     .strict(true),
//! );
//! assert_eq!(tool.name(), "get_discount_percentage");
//! assert_eq!(conversation.len(), 2);
//! ```

pub mod chunk;
pub mod message;
pub mod request;
pub mod tool;

pub use chunk::{ChunkChoice, ChunkDelta, FunctionDelta, StreamChunk, ToolCallDelta};
pub use message::{Message, MessageRole};
pub use request::ChatCompletionRequest;
pub use tool::{FunctionCall, FunctionDefinition, ToolCall, ToolDefinition};
