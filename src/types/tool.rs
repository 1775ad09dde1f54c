//! Tool calling definitions in the OpenAI chat-completions wire shape

use serde::{Deserialize, Serialize};

/// Tool definition (for function calling)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub tool_type: String, // "function"
    pub function: FunctionDefinition,
}

impl ToolDefinition {
    /// Wrap a function definition as a `"function"` tool.
    pub fn function(function: FunctionDefinition) -> Self {
        Self {
            tool_type: "function".to_string(),
            function,
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,
    pub parameters: serde_json::Value, // JSON Schema
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            description: None,
            strict: None,
            parameters,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = Some(strict);
        self
    }
}

/// Tool call record carried by an assistant message.
///
/// `arguments` stays the raw serialized string the model produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type")]
    pub call_type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

impl ToolCall {
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_string(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }

    pub fn arguments(&self) -> &str {
        &self.function.arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_definition_wire_shape() {
        let tool = ToolDefinition::function(
            FunctionDefinition::new("lookup", json!({"type": "object"}))
                .description("Look something up")
                .strict(true),
        );
        let v = serde_json::to_value(&tool).unwrap();
        assert_eq!(v["type"], "function");
        assert_eq!(v["function"]["name"], "lookup");
        assert_eq!(v["function"]["strict"], true);
        assert_eq!(v["function"]["parameters"]["type"], "object");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let tool = ToolDefinition::function(FunctionDefinition::new("bare", json!({})));
        let v = serde_json::to_value(&tool).unwrap();
        assert!(v["function"].get("description").is_none());
        assert!(v["function"].get("strict").is_none());
    }

    #[test]
    fn test_tool_call_keeps_raw_arguments() {
        let call = ToolCall::new("call_1", "get_discount_percentage", r#"{"customer_type":"premium"}"#);
        let v = serde_json::to_value(&call).unwrap();
        assert_eq!(v["type"], "function");
        assert_eq!(v["function"]["arguments"], r#"{"customer_type":"premium"}"#);
    }
}
