//! Bound-model facade.
//!
//! A [`ChatModel`] carries its tool set and tool choice, so call sites only
//! pass messages. It streams message-level chunks instead of raw wire
//! chunks.

pub mod chat;
pub mod prelude;

pub use chat::{
    convert_to_openai_tool, run_bound_turn, ChatModel, MessageChunk, MessageChunkPrinter,
    ToolCallChunk,
};
