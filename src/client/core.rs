use crate::config::{AgcConfig, ModelRef};
use crate::stream::SseDecoder;
use crate::transport::HttpTransport;
use crate::types::{ChatCompletionRequest, Message, StreamChunk, ToolDefinition};
use crate::{BoxStream, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use super::chat::ChatRequestBuilder;

/// Anything that turns a conversation plus tool set into a chunk stream.
///
/// The relay loop and the bound-model facade only depend on this, so they
/// can run against a scripted stream as well as the live gateway.
#[async_trait]
pub trait ChatStreamer: Send + Sync {
    /// Model identifier sent with every request.
    fn model(&self) -> &ModelRef;

    async fn stream_chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: Option<&Value>,
    ) -> Result<BoxStream<'static, StreamChunk>>;
}

/// Streaming chat client bound to one gateway and one model.
#[derive(Clone)]
pub struct AgcClient {
    pub(crate) transport: Arc<HttpTransport>,
    pub(crate) decoder: SseDecoder,
    pub(crate) model: ModelRef,
}

impl AgcClient {
    pub fn new(config: &AgcConfig) -> Result<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
            decoder: SseDecoder::new(),
            model: config.model.clone(),
        })
    }

    /// Start building a chat request.
    pub fn chat(&self) -> ChatRequestBuilder<'_> {
        ChatRequestBuilder::new(self)
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    /// Gateway endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        self.transport.url()
    }

    pub(crate) async fn execute_stream_once(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<BoxStream<'static, StreamChunk>> {
        let bytes = self.transport.execute_stream(request).await?;
        Ok(self.decoder.decode_stream(bytes))
    }
}

#[async_trait]
impl ChatStreamer for AgcClient {
    fn model(&self) -> &ModelRef {
        &self.model
    }

    async fn stream_chat(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: Option<&Value>,
    ) -> Result<BoxStream<'static, StreamChunk>> {
        let mut builder = self.chat().messages(messages.to_vec()).tools(tools.to_vec());
        if let Some(choice) = tool_choice {
            builder = builder.tool_choice(choice.clone());
        }
        builder.execute_stream().await
    }
}
