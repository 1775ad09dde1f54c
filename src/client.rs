//! Client for the gateway's streaming chat-completions endpoint.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod chat;
pub mod core;
#[cfg(test)]
pub(crate) mod scripted;

pub use self::chat::ChatRequestBuilder;
pub use self::core::{AgcClient, ChatStreamer};
#[cfg(test)]
pub(crate) use self::scripted::ScriptedStreamer;
