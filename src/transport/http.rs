use crate::config::AgcConfig;
use crate::types::ChatCompletionRequest;
use crate::{BoxStream, Error, Result};
use bytes::Bytes;
use futures::TryStreamExt;
use serde_json::Value;
use tracing::debug;

/// POSTs chat-completion requests to `{base_url}/chat/completions`.
///
/// Only a connect timeout is set: a stream the gateway stops feeding
/// blocks the run until the connection closes.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &AgcConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            url: config.chat_completions_url(),
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Send `request` and return the response once its status is known to
    /// be a success.
    pub async fn execute_stream_response(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<reqwest::Response> {
        debug!(
            url = %self.url,
            model = %request.model,
            messages = request.messages.len(),
            tools = request.tools.len(),
            "dispatching chat completion"
        );

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .header("accept", "text/event-stream")
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Transport(TransportError::Http(e)))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(Error::remote(
            status.as_u16(),
            remote_message(&body, status.canonical_reason()),
        ))
    }

    /// Raw response body as a byte stream.
    pub async fn execute_stream(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<BoxStream<'static, Bytes>> {
        let resp = self.execute_stream_response(request).await?;
        let byte_stream = resp
            .bytes_stream()
            .map_err(|e| Error::Transport(TransportError::Http(e)));
        Ok(Box::pin(byte_stream))
    }
}

/// Pull `error.message` out of an OpenAI-style error body; fall back to the
/// body text, then the status reason.
fn remote_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        let message = v
            .pointer("/error/message")
            .or_else(|| v.get("message"))
            .or_else(|| v.get("error").filter(|e| e.is_string()))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    reason.unwrap_or("request failed").to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_message_prefers_error_message() {
        let body = r#"{"error": {"message": "Invalid API key", "type": "auth"}}"#;
        assert_eq!(remote_message(body, Some("Unauthorized")), "Invalid API key");
    }

    #[test]
    fn test_remote_message_fallbacks() {
        assert_eq!(remote_message(r#"{"error": "nope"}"#, None), "nope");
        assert_eq!(remote_message("upstream down", None), "upstream down");
        assert_eq!(
            remote_message("", Some("Internal Server Error")),
            "Internal Server Error"
        );
    }
}
