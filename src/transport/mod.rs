//! HTTP transport to the gateway.

pub mod http;

pub use http::{HttpTransport, TransportError};
