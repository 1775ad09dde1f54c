//! Remote Python function tool.
//!
//! The function source travels inside the descriptor, base64-encoded, and
//! the gateway runs it in an E2B code-interpreter sandbox.

use super::schema::{pinned, schema_from_type_name, SchemaGenerator};
use crate::config::AgcConfig;
use crate::types::{FunctionDefinition, ToolDefinition};
use base64::Engine as _;

pub const TOOL_NAME: &str = "python-function-tool";
pub const FUNCTION_NAME: &str = "discount_calculator_macro";
pub const FUNCTION_DESCRIPTION: &str =
    "Applies a discount to a price and returns the calculation details as a dictionary.";
pub const SANDBOX_LABEL: &str = "e2b-server";
pub const SANDBOX_URL: &str = "http://localhost:8000/mcp";

/// Source of `discount_calculator_macro`, one entry per line.
pub const DISCOUNT_CALCULATOR_SOURCE: &[&str] = &[
    "def discount_calculator_macro(price: float, discount_pct: float) -> dict:",
    "    \"\"\"",
    "    Apply a discount to a single price and return result as an object.",
    "",
    "    Args:",
    "        price (float): Original price",
    "        discount_pct (float): Discount percentage (e.g., 20 for 20%)",
    "",
    "    Returns:",
    "        dict: {",
    "            \"original_price\": <float>,",
    "            \"discount_pct\": <float>,",
    "            \"discounted_price\": <float>",
    "        }",
    "    \"\"\"",
    "    discounted_price = price * (1 - discount_pct / 100.0)",
    "    return {",
    "        \"original_price\": price,",
    "        \"discount_pct\": discount_pct,",
    "        \"discounted_price\": round(discounted_price, 2)",
    "    }",
];

/// Join `lines` with `\n` (no trailing newline) and base64-encode the UTF-8 bytes.
pub fn encode_source(lines: &[&str]) -> String {
    base64::engine::general_purpose::STANDARD.encode(lines.join("\n"))
}

/// Descriptor for the sandboxed discount calculator.
pub fn python_function_tool(config: &AgcConfig) -> ToolDefinition {
    let function_parameters = SchemaGenerator::new()
        .require_property("price", schema_from_type_name("number"))
        .require_property("discount_pct", schema_from_type_name("number"))
        .set_additional_properties(false)
        .build();

    let tool_def = SchemaGenerator::new()
        .require_property("name", pinned(FUNCTION_NAME))
        .require_property("description", pinned(FUNCTION_DESCRIPTION))
        .add_property("parameters", function_parameters)
        .set_additional_properties(false)
        .build();

    let code_interpreter = SchemaGenerator::new()
        .require_property("server_label", pinned(SANDBOX_LABEL))
        .require_property("url", pinned(SANDBOX_URL))
        .require_property("apiKey", pinned(config.e2b_api_key_or_empty()))
        .set_additional_properties(false)
        .build();

    let code = encode_source(DISCOUNT_CALCULATOR_SOURCE);

    let mut parameters = SchemaGenerator::new()
        .add_property("type", pinned("py_fun_tool"))
        .add_property("tool_def", tool_def)
        .add_property("code", pinned(code))
        .add_property("code_interpreter", code_interpreter)
        .set_additional_properties(false)
        .build();
    // The gateway expects this exact required order.
    parameters["required"] = serde_json::json!(["type", "code", "code_interpreter", "tool_def"]);

    ToolDefinition::function(FunctionDefinition::new(TOOL_NAME, parameters).strict(true))
}
