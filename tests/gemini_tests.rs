use support_chatbot::config::{
    Config, DEFAULT_BODY_LIMIT, DEFAULT_GEMINI_MODEL, GeminiConfig, ServerConfig,
};
use support_chatbot::routes::create_router;
use support_chatbot::services::gemini::{FALLBACK_REPLY, GeminiClient, ReplyMode, SYSTEM_PROMPT};
use support_chatbot::services::mock;
use support_chatbot::state::AppState;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::util::ServiceExt;

const GENERATE_PATH: &str = "/models/gemini-1.5-pro:generateContent";

fn live_config(server: &ServerGuard) -> GeminiConfig {
    GeminiConfig {
        enabled: true,
        api_key: Some("test-key".to_string()),
        model: DEFAULT_GEMINI_MODEL.to_string(),
        base_url: server.url(),
    }
}

fn key_query() -> Matcher {
    Matcher::UrlEncoded("key".into(), "test-key".into())
}

#[tokio::test]
async fn test_live_reply_uses_candidate_text() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(key_query())
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "role": "user", "parts": [{ "text": "I feel overwhelmed" }] }],
            "systemInstruction": { "parts": [{ "text": SYSTEM_PROMPT }] },
            "generationConfig": { "maxOutputTokens": 800, "topK": 40 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [{ "text": "That sounds like a lot to hold." }],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }]
            }"#,
        )
        .create_async()
        .await;

    let client = GeminiClient::new(live_config(&server)).unwrap();
    assert_eq!(client.mode(), ReplyMode::Live);

    let reply = client.reply("I feel overwhelmed").await;

    mock.assert_async().await;
    assert_eq!(reply, "That sounds like a lot to hold.");
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(key_query())
        .with_status(500)
        .with_body(r#"{"error": {"code": 500, "message": "internal"}}"#)
        .create_async()
        .await;

    let client = GeminiClient::new(live_config(&server)).unwrap();
    let reply = client.reply("hello").await;

    mock.assert_async().await;
    assert_eq!(reply, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    for body in [
        r#"{"candidates": []}"#,
        r#"{"candidates": [{"content": {"parts": []}}]}"#,
        r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#,
        "this is not json",
    ] {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", GENERATE_PATH)
            .match_query(key_query())
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let client = GeminiClient::new(live_config(&server)).unwrap();
        let reply = client.reply("hello").await;

        mock.assert_async().await;
        assert_eq!(reply, FALLBACK_REPLY, "body: {body}");
    }
}

#[tokio::test]
async fn test_mock_mode_never_calls_out() {
    let mut server = Server::new_async().await;
    let upstream = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    // Key present but the flag is off.
    let mut config = live_config(&server);
    config.enabled = false;
    let client = GeminiClient::new(config).unwrap();
    assert_eq!(client.mode(), ReplyMode::Mock);

    // Flag on but no key.
    let mut config = live_config(&server);
    config.api_key = None;
    let keyless = GeminiClient::new(config).unwrap();
    assert_eq!(keyless.mode(), ReplyMode::Mock);

    for client in [&client, &keyless] {
        let reply = client.reply("work has been hard").await;
        assert!(mock::RESPONSES.iter().any(|body| reply.ends_with(body)));
        assert_ne!(reply, FALLBACK_REPLY);
    }

    upstream.assert_async().await;
}

#[tokio::test]
async fn test_chat_route_returns_200_on_upstream_failure() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", GENERATE_PATH)
        .match_query(key_query())
        .with_status(503)
        .create_async()
        .await;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            body_limit: DEFAULT_BODY_LIMIT,
        },
        gemini: live_config(&server),
    };
    let state = Arc::new(AppState::new(config).unwrap());
    let app = create_router().with_state(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message": "are you there?", "conversation_id": "c-1"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], FALLBACK_REPLY);
    assert_eq!(body["conversation_id"], "c-1");
}

#[tokio::test]
async fn test_unreachable_upstream_falls_back() {
    // Nothing listens on the discard port locally.
    let config = GeminiConfig {
        enabled: true,
        api_key: Some("test-key".to_string()),
        model: DEFAULT_GEMINI_MODEL.to_string(),
        base_url: "http://127.0.0.1:9".to_string(),
    };

    let client = GeminiClient::new(config).unwrap();
    assert_eq!(client.reply("hello").await, FALLBACK_REPLY);
}
