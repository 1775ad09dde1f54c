//! Tools declared as Rust types.
//!
//! The argument struct is the source of truth for the parameter schema:
//! `schemars` derives it, constants are single-variant enums, and
//! `deny_unknown_fields` closes the object.

use crate::types::{FunctionDefinition, ToolDefinition};
use schemars::r#gen::SchemaSettings;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A tool whose parameters are described by `Args`.
pub trait TypedTool {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    type Args: JsonSchema;

    fn parameters() -> Value {
        schema_for_args::<Self::Args>()
    }

    fn definition() -> ToolDefinition {
        ToolDefinition::function(
            FunctionDefinition::new(Self::NAME, Self::parameters()).description(Self::DESCRIPTION),
        )
    }
}

/// Inline parameter schema for `T`, without the draft and title noise the
/// gateway does not accept.
pub fn schema_for_args<T: JsonSchema>() -> Value {
    let root = SchemaSettings::draft07()
        .with(|s| s.inline_subschemas = true)
        .into_generator()
        .into_root_schema_for::<T>();
    let mut value = serde_json::to_value(root).unwrap_or_else(|_| Value::Object(Default::default()));
    if let Some(map) = value.as_object_mut() {
        map.remove("$schema");
        map.remove("title");
        map.remove("definitions");
    }
    value
}

/// Typed twin of [`crate::tools::mcp::allbirds_tool`].
///
/// The gateway runs it; this side only sends the declaration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllbirdsMcp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct AllbirdsMcpArgs {
    #[serde(rename = "type")]
    pub kind: McpKind,
    pub server_label: AllbirdsLabel,
    pub server_url: AllbirdsUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum McpKind {
    #[serde(rename = "mcp")]
    Mcp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AllbirdsLabel {
    #[serde(rename = "allbirds")]
    Allbirds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AllbirdsUrl {
    #[serde(rename = "https://allbirds.com/api/mcp")]
    Allbirds,
}

impl TypedTool for AllbirdsMcp {
    const NAME: &'static str = super::mcp::ALLBIRDS_TOOL_NAME;
    const DESCRIPTION: &'static str = super::mcp::ALLBIRDS_TOOL_DESCRIPTION;

    type Args = AllbirdsMcpArgs;
}
