//! Completion Client Integration Tests
//!
//! Runs `CompletionClient` over real HTTP against a local stub endpoint that
//! speaks the chat-completions format.

use mock_interview::services::interview::{CompletionOutcome, FallbackReason};
use mock_interview::{AppConfig, CompletionClient, RequestProfile};
use mock_interview_llm::{LlmError, Message};

use super::support::{chat_completion_body, spawn_stub_endpoint};

fn config_for(url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.provider.api_key = Some("sk-stub".to_string());
    config.provider.base_url = Some(url.to_string());
    config.request_timeout_secs = 5;
    config
}

#[tokio::test]
async fn test_successful_completion_over_http() {
    let (url, bodies) =
        spawn_stub_endpoint(vec![(200, chat_completion_body("面试官：请做个自我介绍"))]).await;
    let client = CompletionClient::from_config(&config_for(&url)).unwrap();
    assert!(client.is_online());

    let outcome = client
        .complete(
            Some("你是一位面试官"),
            vec![Message::user("你好")],
            RequestProfile::conversation(),
        )
        .await;
    assert_eq!(outcome, CompletionOutcome::Reply("请做个自我介绍".to_string()));

    let sent: serde_json::Value = serde_json::from_str(&bodies.lock().unwrap()[0]).unwrap();
    assert_eq!(sent["model"], "glm-4-flash");
    assert_eq!(sent["stream"], false);
    assert_eq!(sent["max_tokens"], 1024);
    assert_eq!(sent["messages"][0]["role"], "system");
    assert_eq!(sent["messages"][1]["content"], "你好");
}

#[tokio::test]
async fn test_non_success_status_is_fallback() {
    let (url, _) =
        spawn_stub_endpoint(vec![(500, r#"{"error":{"message":"overloaded"}}"#.to_string())]).await;
    let client = CompletionClient::from_config(&config_for(&url)).unwrap();

    let outcome = client
        .complete(None, vec![Message::user("test")], RequestProfile::conversation())
        .await;
    assert!(matches!(
        outcome,
        CompletionOutcome::Fallback(FallbackReason::Remote(LlmError::ServerError {
            status: Some(500),
            ..
        }))
    ));
}

#[tokio::test]
async fn test_missing_choice_is_fallback() {
    let (url, _) = spawn_stub_endpoint(vec![(200, r#"{"choices":[]}"#.to_string())]).await;
    let client = CompletionClient::from_config(&config_for(&url)).unwrap();

    let outcome = client
        .complete(None, vec![Message::user("test")], RequestProfile::conversation())
        .await;
    assert!(matches!(
        outcome,
        CompletionOutcome::Fallback(FallbackReason::Remote(LlmError::ParseError { .. }))
    ));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_fallback() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let url = format!("http://127.0.0.1:{}/v1/chat/completions", port);
    let client = CompletionClient::from_config(&config_for(&url)).unwrap();

    let outcome = client
        .complete(None, vec![Message::user("test")], RequestProfile::conversation())
        .await;
    assert!(outcome.is_fallback());
}
