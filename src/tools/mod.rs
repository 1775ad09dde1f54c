//! Tool descriptor builders.
//!
//! Every builder is a pure function of [`AgcConfig`](crate::config::AgcConfig)
//! (or of nothing): identical configuration yields identical descriptors.
//! Descriptors are forwarded as-is; the gateway is the only validator.
//!
//! | Module | Tool | Executed by |
//! |--------|------|-------------|
//! | [`file_search`] | `file-search-tool` | gateway (vector store) |
//! | [`mcp`] | `allbirds_mcp_tool_action_YWxsYmlyZH` | gateway (MCP server) |
//! | [`py_function`] | `python-function-tool` | gateway (E2B sandbox) |
//! | [`local`] | `get_discount_percentage` | this process |
//! | [`typed`] | typed twin of the MCP tool | gateway |

pub mod file_search;
pub mod local;
pub mod mcp;
pub mod py_function;
pub mod schema;
pub mod typed;

pub use file_search::file_search_tool;
pub use local::{
    discount_percentage_tool, DiscountPercentage, LocalTool, LocalToolRegistry, NoticeSink,
};
pub use mcp::{allbirds_tool, McpServer};
pub use py_function::{encode_source, python_function_tool};
pub use typed::{AllbirdsMcp, TypedTool};

use crate::types::ToolDefinition;

/// Anything that can be sent as a tool declaration.
pub trait IntoToolDefinition {
    fn to_tool_definition(&self) -> ToolDefinition;
}

impl IntoToolDefinition for ToolDefinition {
    fn to_tool_definition(&self) -> ToolDefinition {
        self.clone()
    }
}

impl<T: TypedTool> IntoToolDefinition for T {
    fn to_tool_definition(&self) -> ToolDefinition {
        T::definition()
    }
}
