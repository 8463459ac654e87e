use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use chatbot_cell::handlers;
use chatbot_cell::models::ChatRequest;
use shared_database::AppContext;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreResponses, TestConfig};

fn chat_message_row(session_id: &str, message: &str, sender: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "session_id": session_id,
        "message": message,
        "sender": sender,
        "timestamp": Utc::now().to_rfc3339()
    })
}

async fn mount_catalog(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::service_row(&Uuid::new_v4().to_string())
        ])))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/doctors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockStoreResponses::doctor_row(&Uuid::new_v4().to_string())
        ])))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn chat_persists_both_turns_and_answers_from_script() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();

    mount_catalog(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            chat_message_row("web-session", "echo", "user")
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let Json(response) = handlers::chat(
        State(ctx),
        Json(ChatRequest {
            message: "when are you open?".to_string(),
            session_id: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.session_id, "web-session");
    assert!(response.message.contains("Monday - Friday"));
    assert!(response.message.contains("8:00 AM"));
}

#[tokio::test]
async fn chat_keeps_the_callers_session() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();

    mount_catalog(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/chat_messages"))
        .and(body_partial_json(json!({"session_id": "session-42"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            chat_message_row("session-42", "echo", "user")
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;

    let Json(response) = handlers::chat(
        State(ctx),
        Json(ChatRequest {
            message: "hello".to_string(),
            session_id: Some("session-42".to_string()),
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.session_id, "session-42");
}

#[tokio::test]
async fn empty_message_is_rejected() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();

    let err = handlers::chat(
        State(ctx),
        Json(ChatRequest {
            message: "   ".to_string(),
            session_id: None,
        }),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::Validation(_));
}

#[tokio::test]
async fn llm_path_is_used_when_configured() {
    let mock_server = MockServer::start().await;
    let mut config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    config.openai_api_key = "sk-test".to_string();
    let ctx = Arc::new(AppContext::new(config));

    Mock::given(method("POST"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            chat_message_row("web-session", "echo", "user")
        ])))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            chat_message_row("web-session", "tell me about implants", "user")
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-4", "max_tokens": 200})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Implants start at $2500." } }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let Json(response) = handlers::chat(
        State(ctx),
        Json(ChatRequest {
            message: "tell me about implants".to_string(),
            session_id: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.message, "Implants start at $2500.");
}

#[tokio::test]
async fn llm_context_window_keeps_the_newest_turns() {
    let mock_server = MockServer::start().await;
    let mut config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    config.openai_api_key = "sk-test".to_string();
    let ctx = Arc::new(AppContext::new(config));

    Mock::given(method("POST"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            chat_message_row("web-session", "echo", "user")
        ])))
        .mount(&mock_server)
        .await;
    // The store answers newest-first; the prompt must read oldest-first.
    Mock::given(method("GET"))
        .and(path("/rest/v1/chat_messages"))
        .and(query_param("order", "timestamp.desc"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            chat_message_row("web-session", "and how much is whitening?", "user"),
            chat_message_row("web-session", "We offer whitening and implants.", "bot"),
            chat_message_row("web-session", "what services do you have?", "user"),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system" },
                { "role": "user", "content": "what services do you have?" },
                { "role": "assistant", "content": "We offer whitening and implants." },
                { "role": "user", "content": "and how much is whitening?" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "Whitening is $299." } }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let Json(response) = handlers::chat(
        State(ctx),
        Json(ChatRequest {
            message: "and how much is whitening?".to_string(),
            session_id: None,
        }),
    )
    .await
    .unwrap();

    assert_eq!(response.message, "Whitening is $299.");
}

#[tokio::test]
async fn llm_failure_falls_back_to_script() {
    let mock_server = MockServer::start().await;
    let mut config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();
    config.openai_api_key = "sk-test".to_string();
    let ctx = Arc::new(AppContext::new(config));

    mount_catalog(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            chat_message_row("web-session", "echo", "user")
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/chat_messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let Json(response) = handlers::chat(
        State(ctx),
        Json(ChatRequest {
            message: "when are you open?".to_string(),
            session_id: None,
        }),
    )
    .await
    .unwrap();

    assert!(response.message.contains("Working Hours"));
}
