//! Fixed conversations for each scenario.

use crate::types::Message;
use std::fmt;

/// The runs this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Remote file-search tool, one streamed turn.
    FileSearch,
    /// MCP passthrough tool, one streamed turn.
    Mcp,
    /// MCP tool sent through the bound-model facade.
    McpBound,
    /// Remote Python function tool, one streamed turn.
    PyFunTool,
    /// Python function tool plus a locally executed tool, relay loop.
    LocalTool,
}

const ECOMMERCE_SYSTEM_PROMPT: &str = "You are an ecommerce assistant who can help in product selection, add to cart, provide checkout link.\n\
1. Use all birds tool for product search and update cart.\n\
2. return image url in a proper markdown format.\n\
3. whenever you update cart, share checkout link also.";

const DISCOUNT_AGENT_SYSTEM_PROMPT: &str = "You are discount calculator agent. Given the original price and discount percentage, you calculate discounted price using provided tool.\n\
You have access to the following special tools:\n\
1. offer percentage provider. This provides applicable %age of discount on an item.\n\
2. discount calculatorr. This can calculate the final price based on the discount provided.";

impl Scenario {
    pub const ALL: [Scenario; 5] = [
        Scenario::FileSearch,
        Scenario::Mcp,
        Scenario::McpBound,
        Scenario::PyFunTool,
        Scenario::LocalTool,
    ];

    /// System instructions plus one user request, in that order.
    pub fn messages(self) -> Vec<Message> {
        let (system, user) = match self {
            Scenario::FileSearch => (
                "Use the given file search tool to prepare answer. Do not frame any answer yourself, If tool fails then just return sorry message with cause of sorry message.",
                "Find one reaction of Magnesium",
            ),
            Scenario::Mcp | Scenario::McpBound => {
                (ECOMMERCE_SYSTEM_PROMPT, "Find me sneakers of size 8")
            }
            Scenario::PyFunTool => (
                "Use the given compute function tool to perform calculations. Do not perform calculations youself. If tool fails then just return sorry message with cause of sorry message.",
                "give discount of 5% on $100",
            ),
            Scenario::LocalTool => (
                DISCOUNT_AGENT_SYSTEM_PROMPT,
                "Offer $100 sneakers to premium customers.",
            ),
        };
        vec![Message::system(system), Message::user(user)]
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Scenario::LocalTool => "claude@claude-3-7-sonnet-20250219",
            _ => "openai@gpt-4.1-mini",
        }
    }

    pub fn requires_e2b(self) -> bool {
        matches!(self, Scenario::PyFunTool)
    }

    /// Headline printed when the run starts.
    pub fn banner(self) -> &'static str {
        match self {
            Scenario::FileSearch => "🚀 AgC Loop with File Search tool Example",
            Scenario::Mcp => "🚀 AgC Loop with MCP Example",
            Scenario::McpBound => "🚀 AgC Loop with MCP Example (bound model)",
            Scenario::PyFunTool => "🚀 AgC Loop with Python Function tool Example",
            Scenario::LocalTool => "🚀 AgC Loop with MCP And One local tool Example",
        }
    }

    /// What the streamed request is doing, printed before dispatch.
    pub fn title(self) -> &'static str {
        match self {
            Scenario::FileSearch => "🔄 AgC Streaming Chat Completion with File Search Tool Calling",
            Scenario::Mcp => "🔄 AgC Streaming Chat Completion with MCP Tool Calling",
            Scenario::McpBound => {
                "🔄 AgC Streaming Chat Completion with MCP Tool Calling (bound model)"
            }
            Scenario::PyFunTool => {
                "🔄 AgC Streaming Chat Completion with Python Function Tool Calling"
            }
            Scenario::LocalTool => "=== AgC Streaming Chat Completion with local tool relay ===",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scenario::FileSearch => "file-search",
            Scenario::Mcp => "mcp",
            Scenario::McpBound => "mcp-bound",
            Scenario::PyFunTool => "py-fun-tool",
            Scenario::LocalTool => "local-tool",
        };
        f.write_str(name)
    }
}
