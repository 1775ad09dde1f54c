//! MCP passthrough tools.
//!
//! The gateway connects to the MCP server named in the descriptor and runs
//! the server's tools itself; nothing is executed on this side.

use super::schema::{pinned, SchemaGenerator};
use crate::types::{FunctionDefinition, ToolDefinition};
use serde::{Deserialize, Serialize};

/// A remote MCP server the gateway should proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServer {
    /// Label the gateway uses to identify the server.
    pub label: String,
    /// Streamable HTTP endpoint of the server.
    pub url: String,
}

impl McpServer {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    pub fn allbirds() -> Self {
        Self::new("allbirds", "https://allbirds.com/api/mcp")
    }

    /// Pinned parameter schema (`type`, `server_label`, `server_url`).
    pub fn parameters(&self) -> serde_json::Value {
        SchemaGenerator::new()
            .require_property("type", pinned("mcp"))
            .require_property("server_label", pinned(self.label.as_str()))
            .require_property("server_url", pinned(self.url.as_str()))
            .set_additional_properties(false)
            .build()
    }

    /// Wrap this server as a function tool.
    pub fn tool(&self, name: impl Into<String>, description: impl Into<String>) -> ToolDefinition {
        ToolDefinition::function(
            FunctionDefinition::new(name, self.parameters()).description(description),
        )
    }
}

pub const ALLBIRDS_TOOL_NAME: &str = "allbirds_mcp_tool_action_YWxsYmlyZH";
pub const ALLBIRDS_TOOL_DESCRIPTION: &str = "Allbirds MCP server tool";

/// Descriptor for the Allbirds storefront MCP server.
pub fn allbirds_tool() -> ToolDefinition {
    McpServer::allbirds().tool(ALLBIRDS_TOOL_NAME, ALLBIRDS_TOOL_DESCRIPTION)
}
