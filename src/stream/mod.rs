//! Streaming response decoding (bytes -> [`StreamChunk`](crate::types::StreamChunk)).

pub mod decode;

pub use decode::{decode_chunks, SseDecoder};
