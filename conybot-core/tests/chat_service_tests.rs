// tests/chat_service_tests.rs

use std::sync::Arc;

use serde_json::json;

use conybot_core::chat::{
    CompletionConfig, CompletionHttpResponse, LINE_APOLOGY_UNEXPECTED, LINE_APOLOGY_UNREACHABLE,
    LineChatService, MockCompletionTransport, TransportError, WEB_APOLOGY_UNEXPECTED,
    WEB_APOLOGY_UNREACHABLE, WebChatService,
};
use conybot_core::persona::Persona;

fn test_config() -> CompletionConfig {
    CompletionConfig::new("https://proxy.example/v1", "test-key")
}

fn test_persona() -> Persona {
    Persona::from_text("You are Cony.")
}

fn ok_response(content: &str) -> CompletionHttpResponse {
    CompletionHttpResponse {
        status: 200,
        body: json!({
            "choices": [
                { "message": { "role": "assistant", "content": content } },
            ],
        }),
    }
}

#[tokio::test]
async fn web_chat_returns_trimmed_reply() {
    let mut transport = MockCompletionTransport::new();
    transport
        .expect_post_json()
        .withf(|url, headers, payload, _timeout| {
            url == "https://proxy.example/v1/chat/completions"
                && headers.get("Authorization") == Some(&"Bearer test-key".to_string())
                && payload["model"] == "gpt-4o"
                && payload["messages"][0]["role"] == "system"
        })
        .returning(|_, _, _, _| Ok(ok_response("  哈囉～我是Cony！  ")));

    let service = WebChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("hi").await, "哈囉～我是Cony！");
}

#[tokio::test]
async fn web_chat_wraps_user_turn() {
    let mut transport = MockCompletionTransport::new();
    transport
        .expect_post_json()
        .withf(|_, _, payload, _| {
            let user_turn = payload["messages"][1]["content"].as_str().unwrap_or_default();
            user_turn.starts_with("User said: 今天好嗎.")
                && user_turn.contains("Reply as Cony in Traditional Chinese")
        })
        .returning(|_, _, _, _| Ok(ok_response("好呀")));

    let service = WebChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("今天好嗎").await, "好呀");
}

#[tokio::test]
async fn transport_failure_yields_first_apology_verbatim() {
    let mut transport = MockCompletionTransport::new();
    transport
        .expect_post_json()
        .returning(|_, _, _, _| Err(TransportError::Transport("connection refused".into())));

    let service = WebChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("hi").await, WEB_APOLOGY_UNREACHABLE);
}

#[tokio::test]
async fn malformed_response_yields_second_apology_verbatim() {
    let mut transport = MockCompletionTransport::new();
    transport
        .expect_post_json()
        .returning(|_, _, _, _| Err(TransportError::Malformed("not json".into())));

    let service = WebChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("hi").await, WEB_APOLOGY_UNEXPECTED);
}

#[tokio::test]
async fn api_error_payload_yields_second_apology() {
    let mut transport = MockCompletionTransport::new();
    transport.expect_post_json().returning(|_, _, _, _| {
        Ok(CompletionHttpResponse {
            status: 429,
            body: json!({ "error": { "message": "rate limited" } }),
        })
    });

    let service = WebChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("hi").await, WEB_APOLOGY_UNEXPECTED);
}

#[tokio::test]
async fn missing_content_yields_second_apology() {
    let mut transport = MockCompletionTransport::new();
    transport.expect_post_json().returning(|_, _, _, _| {
        Ok(CompletionHttpResponse {
            status: 200,
            body: json!({ "choices": [] }),
        })
    });

    let service = WebChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("hi").await, WEB_APOLOGY_UNEXPECTED);
}

#[tokio::test]
async fn line_chat_uses_its_own_apology_pair() {
    let mut transport = MockCompletionTransport::new();
    transport
        .expect_post_json()
        .returning(|_, _, _, _| Err(TransportError::Transport("timeout".into())));

    let service = LineChatService::new(Arc::new(transport), test_config(), test_persona());
    let reply = service.generate_reply("hi").await;
    assert_eq!(reply, LINE_APOLOGY_UNREACHABLE);
    assert_ne!(reply, WEB_APOLOGY_UNREACHABLE);

    let mut transport = MockCompletionTransport::new();
    transport.expect_post_json().returning(|_, _, _, _| {
        Ok(CompletionHttpResponse {
            status: 200,
            body: json!({}),
        })
    });
    let service = LineChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("hi").await, LINE_APOLOGY_UNEXPECTED);
}

#[tokio::test]
async fn line_chat_routes_text_through_keyword_table() {
    let mut transport = MockCompletionTransport::new();
    transport
        .expect_post_json()
        .withf(|_, _, payload, _| {
            let user_turn = payload["messages"][1]["content"].as_str().unwrap_or_default();
            user_turn.starts_with("【客服支援】")
        })
        .returning(|_, _, _, _| Ok(ok_response("沒問題！")));

    let service = LineChatService::new(Arc::new(transport), test_config(), test_persona());
    assert_eq!(service.generate_reply("@客戶服務 怎麼退貨").await, "沒問題！");
}
