use crate::types::{ChatCompletionRequest, Message, StreamChunk, ToolDefinition};
use crate::{BoxStream, Result};

use super::core::AgcClient;

/// Builder for streaming chat requests.
pub struct ChatRequestBuilder<'a> {
    pub(crate) client: &'a AgcClient,
    pub(crate) messages: Vec<Message>,
    pub(crate) tools: Vec<ToolDefinition>,
    pub(crate) tool_choice: Option<serde_json::Value>,
}

impl<'a> ChatRequestBuilder<'a> {
    pub(crate) fn new(client: &'a AgcClient) -> Self {
        Self {
            client,
            messages: Vec::new(),
            tools: Vec::new(),
            tool_choice: None,
        }
    }

    /// Set the conversation, oldest message first.
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Set tools for function calling.
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    /// Set tool_choice (OpenAI-style). Omitted from the body when unset.
    pub fn tool_choice(mut self, tool_choice: serde_json::Value) -> Self {
        self.tool_choice = Some(tool_choice);
        self
    }

    /// The request body this builder would send.
    pub fn build_request(&self) -> ChatCompletionRequest {
        ChatCompletionRequest::streaming(self.client.model.to_string(), self.messages.clone())
            .tools(self.tools.clone())
            .tool_choice(self.tool_choice.clone())
    }

    /// Send the request and return the decoded chunk stream.
    ///
    /// The stream is lazy and single-use: chunks are decoded as bytes
    /// arrive and it ends at `[DONE]` or when the connection closes.
    pub async fn execute_stream(self) -> Result<BoxStream<'static, StreamChunk>> {
        let request = self.build_request();
        self.client.execute_stream_once(&request).await
    }
}
