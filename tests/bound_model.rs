//! Bound-model facade over HTTP.

mod common;

use agc_loop::conversation::Scenario;
use agc_loop::facade::{run_bound_turn, ChatModel, MessageChunk};
use agc_loop::tools::AllbirdsMcp;
use common::*;
use futures::TryStreamExt;
use mockito::{Matcher, Server};
use serde_json::json;

#[tokio::test]
async fn test_bound_typed_tool_is_declared() {
    let mut server = Server::new_async().await;
    let mock = mock_stream(
        &mut server,
        Matcher::AllOf(vec![
            Matcher::Regex(r#""name":"allbirds_mcp_tool_action_YWxsYmlyZH""#.to_string()),
            Matcher::Regex(r#""enum":\["https://allbirds\.com/api/mcp"\]"#.to_string()),
            Matcher::Regex(r#""additionalProperties":false"#.to_string()),
        ]),
        &[
            tool_call(0, Some("call_a"), Some("allbirds_mcp_tool_action_YWxsYmlyZH"), "{}"),
            content("Found 3 pairs."),
            finish("stop"),
        ],
    )
    .await;

    let config = config_for(&server, Scenario::McpBound);
    let model = ChatModel::from_config(&config)
        .unwrap()
        .bind_tools(&[AllbirdsMcp])
        .tool_choice(None);
    assert_eq!(model.tools().len(), 1);

    let out = run_bound_turn(
        &model,
        Scenario::McpBound.title(),
        &Scenario::McpBound.messages(),
        Vec::new(),
    )
    .await
    .unwrap();

    mock.assert_async().await;
    let out = String::from_utf8(out).unwrap();
    assert!(out.contains("🔧 [Tool calls detected]\n   ⚙️  allbirds_mcp_tool_action_YWxsYmlyZH\n"));
    assert!(out.contains("Found 3 pairs."));
    assert!(out.ends_with("\n--- ✅ Streaming Complete ---\n"));
}

#[tokio::test]
async fn test_tool_choice_is_sent_when_set() {
    let mut server = Server::new_async().await;
    let mock = mock_stream(
        &mut server,
        Matcher::PartialJson(json!({"tool_choice": "required", "stream": true})),
        &[content("ok")],
    )
    .await;

    let config = config_for(&server, Scenario::McpBound);
    let model = ChatModel::from_config(&config)
        .unwrap()
        .bind_tools(&[AllbirdsMcp])
        .tool_choice(Some(json!("required")));

    let chunks: Vec<MessageChunk> = model
        .stream(&Scenario::McpBound.messages())
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "ok");
    assert!(chunks[0].tool_calls.is_empty());
}
