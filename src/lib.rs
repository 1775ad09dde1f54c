//! # agc-loop
//!
//! Tool-calling loops against an AgC gateway: an OpenAI-compatible chat
//! completions endpoint (by default `http://localhost:6644/v1`) that
//! executes remote tools itself and streams the result back.
//!
//! ## Overview
//!
//! Every run sends a fixed conversation plus a set of tool descriptors,
//! receives the answer as a server-sent-event stream, and prints it as it
//! arrives. Five tool patterns are covered:
//!
//! - **File search**: the gateway searches a vector store.
//! - **MCP**: the gateway proxies a remote MCP server.
//! - **Python function**: base64-encoded Python source runs in a sandbox.
//! - **Local tool relay**: some tools run in this process, results are
//!   fed back turn by turn.
//! - **Bound model**: the MCP tool declared as a typed Rust struct and
//!   bound to a [`facade::ChatModel`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agc_loop::client::AgcClient;
//! use agc_loop::config::AgcConfig;
//! use agc_loop::conversation::Scenario;
//! use agc_loop::processor::run_single_turn;
//! use agc_loop::tools::allbirds_tool;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> agc_loop::Result<()> {
//!     let config = AgcConfig::from_env(Scenario::Mcp)?;
//!     let client = AgcClient::new(&config)?;
//!     run_single_turn(
//!         &client,
//!         Scenario::Mcp.title(),
//!         &Scenario::Mcp.messages(),
//!         &[allbirds_tool()],
//!         std::io::stdout(),
//!     )
//!     .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment resolution, model identifiers |
//! | [`types`] | Wire types (messages, tools, stream chunks) |
//! | [`tools`] | Tool descriptor builders and local tools |
//! | [`conversation`] | Fixed conversations per scenario |
//! | [`transport`] | HTTP transport |
//! | [`stream`] | SSE decoding |
//! | [`client`] | Streaming chat client |
//! | [`processor`] | Console rendering of chunks |
//! | [`relay`] | Local tool relay loop |
//! | [`facade`] | Bound-model facade |

pub mod client;
pub mod config;
pub mod conversation;
pub mod facade;
pub mod processor;
pub mod relay;
pub mod stream;
pub mod tools;
pub mod transport;
pub mod types;

pub use client::{AgcClient, ChatStreamer};
pub use config::{AgcConfig, ModelRef};
pub use conversation::Scenario;
pub use types::{Message, MessageRole, StreamChunk, ToolCall, ToolDefinition};

use futures::Stream;
use std::pin::Pin;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// A unified pinned, boxed stream that emits `Result<T>`
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = Result<T>> + Send + 'a>>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
