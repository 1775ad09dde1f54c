//! Tools executed in this process during the relay loop.

use super::schema::SchemaGenerator;
use crate::types::{FunctionDefinition, ToolDefinition};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};

pub const DISCOUNT_TOOL_NAME: &str = "get_discount_percentage";

/// Descriptor for the local discount-percentage lookup.
pub fn discount_percentage_tool() -> ToolDefinition {
    let parameters = SchemaGenerator::new()
        .require_property(
            "customer_type",
            json!({
                "type": "string",
                "description": "Type of the customer, such as 'regular', 'premium', or 'new'"
            }),
        )
        .set_additional_properties(false)
        .build();

    ToolDefinition::function(
        FunctionDefinition::new(DISCOUNT_TOOL_NAME, parameters)
            .description("Return discount percentage based on input customer type")
            .strict(true),
    )
}

/// A tool the relay loop runs itself when the model calls it.
///
/// `call` receives the raw argument string exactly as accumulated from the
/// stream and returns the text sent back as the tool message.
pub trait LocalTool: Send + Sync {
    fn name(&self) -> &str;

    fn definition(&self) -> ToolDefinition;

    fn call(&self, arguments: &str) -> String;
}

/// Shared notice sink for local tools (stdout in the binary).
pub type NoticeSink = Arc<Mutex<dyn Write + Send>>;

/// Flat 5% discount for every customer type.
pub struct DiscountPercentage {
    notices: NoticeSink,
}

impl DiscountPercentage {
    pub const RESULT: &'static str = "This customer is eligible for 5% discount";

    pub fn new() -> Self {
        Self::with_notices(Arc::new(Mutex::new(std::io::stdout())))
    }

    pub fn with_notices(notices: NoticeSink) -> Self {
        Self { notices }
    }

    fn notice(&self, line: &str) {
        if let Ok(mut out) = self.notices.lock() {
            // Notices are informational; a closed sink does not fail the tool.
            let _ = writeln!(out, "{}", line);
        }
    }
}

impl Default for DiscountPercentage {
    fn default() -> Self {
        Self::new()
    }
}

/// `customer_type` out of a JSON argument object, or the raw text itself.
fn customer_type(arguments: &str) -> String {
    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::Object(map)) => match map.get("customer_type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => arguments.to_string(),
        },
        _ => arguments.to_string(),
    }
}

impl LocalTool for DiscountPercentage {
    fn name(&self) -> &str {
        DISCOUNT_TOOL_NAME
    }

    fn definition(&self) -> ToolDefinition {
        discount_percentage_tool()
    }

    fn call(&self, arguments: &str) -> String {
        let customer = customer_type(arguments);
        self.notice(&format!("[LocalTool]: Calculating discount for {}", customer));
        let result = Self::RESULT.to_string();
        self.notice(&format!("[LocalTool]: {}", result));
        result
    }
}

/// Local tools by name, in registration order.
#[derive(Default, Clone)]
pub struct LocalToolRegistry {
    tools: Vec<Arc<dyn LocalTool>>,
    by_name: HashMap<String, usize>,
}

impl LocalToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `tool`. A later registration under the same name replaces
    /// the earlier one.
    pub fn register(mut self, tool: impl LocalTool + 'static) -> Self {
        let name = tool.name().to_string();
        let tool: Arc<dyn LocalTool> = Arc::new(tool);
        match self.by_name.get(&name) {
            Some(&idx) => self.tools[idx] = tool,
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn LocalTool> {
        self.by_name.get(name).map(|&idx| self.tools[idx].as_ref())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl std::fmt::Debug for LocalToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name().to_string()))
            .finish()
    }
}
