//! Shared fixtures for the HTTP integration tests.

#![allow(dead_code)]

use agc_loop::config::AgcConfig;
use agc_loop::conversation::Scenario;
use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

pub const API_KEY: &str = "sk-test";
pub const CHAT_PATH: &str = "/v1/chat/completions";

/// Config pointing at `server`, as if resolved from the environment.
pub fn config_for(server: &ServerGuard, scenario: Scenario) -> AgcConfig {
    let base_url = format!("{}/v1", server.url());
    AgcConfig::resolve(scenario, move |key| match key {
        "OPENAI_API_KEY" => Some(API_KEY.to_string()),
        "E2B_API_KEY" => Some("e2b-test".to_string()),
        "AGC_BASE_URL" => Some(base_url.clone()),
        _ => None,
    })
    .expect("test config resolves")
}

/// SSE body: one `data:` frame per value, then `[DONE]`.
pub fn sse(frames: &[Value]) -> String {
    let mut body: String = frames
        .iter()
        .map(|f| format!("data: {}\n\n", f))
        .collect();
    body.push_str("data: [DONE]\n\n");
    body
}

pub fn content(text: &str) -> Value {
    json!({"object": "chat.completion.chunk", "choices": [{"index": 0, "delta": {"content": text}, "finish_reason": null}]})
}

pub fn tool_call(index: u32, id: Option<&str>, name: Option<&str>, arguments: &str) -> Value {
    let mut call = json!({"index": index, "type": "function", "function": {"arguments": arguments}});
    if let Some(id) = id {
        call["id"] = json!(id);
    }
    if let Some(name) = name {
        call["function"]["name"] = json!(name);
    }
    json!({"choices": [{"index": 0, "delta": {"tool_calls": [call]}, "finish_reason": null}]})
}

pub fn finish(reason: &str) -> Value {
    json!({"choices": [{"index": 0, "delta": {}, "finish_reason": reason}]})
}

/// A streaming mock for the chat endpoint whose body must match `body`.
pub async fn mock_stream(server: &mut ServerGuard, body: Matcher, frames: &[Value]) -> Mock {
    server
        .mock("POST", CHAT_PATH)
        .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
        .match_header("accept", "text/event-stream")
        .match_body(body)
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(frames))
        .expect(1)
        .create_async()
        .await
}
