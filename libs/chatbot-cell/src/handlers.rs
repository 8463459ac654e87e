use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::json;
use tracing::warn;

use doctor_cell::models::Doctor;
use service_cell::models::Service;
use shared_database::AppContext;
use shared_models::error::AppError;

use crate::models::{ChatError, ChatMessage, ChatRequest, ChatResponse};
use crate::services::assistant::scripted_reply;
use crate::services::llm::LlmClient;

const DEFAULT_SESSION: &str = "web-session";

async fn scripted_answer(ctx: &AppContext, message: &str) -> Result<String, ChatError> {
    let services: Vec<Service> = ctx.store.select("services", "is_active=eq.true").await?;
    let doctors: Vec<Doctor> = ctx.store.select("doctors", "").await?;
    Ok(scripted_reply(message, &services, &doctors))
}

async fn llm_answer(ctx: &AppContext, session_id: &str) -> Result<String, ChatError> {
    // Newest ten turns, flipped back to chronological order for the prompt.
    let mut history: Vec<ChatMessage> = ctx
        .store
        .select(
            "chat_messages",
            &format!(
                "session_id=eq.{}&order=timestamp.desc&limit=10",
                session_id
            ),
        )
        .await?;
    history.reverse();
    LlmClient::new(&ctx.config).complete(&history).await
}

#[axum::debug_handler]
pub async fn chat(
    State(ctx): State<Arc<AppContext>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(ChatError::EmptyMessage.into());
    }
    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());

    let _: ChatMessage = ctx
        .store
        .insert(
            "chat_messages",
            "",
            json!({
                "session_id": session_id,
                "message": request.message,
                "sender": "user",
            }),
        )
        .await
        .map_err(ChatError::from)?;

    // The scripted reply is the fallback whenever the LLM path is off or
    // fails; patients always get an answer.
    let reply = if ctx.config.is_assistant_llm_configured() {
        match llm_answer(&ctx, &session_id).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Assistant LLM unavailable, falling back to script: {}", e);
                scripted_answer(&ctx, &request.message).await?
            }
        }
    } else {
        scripted_answer(&ctx, &request.message).await?
    };

    let _: ChatMessage = ctx
        .store
        .insert(
            "chat_messages",
            "",
            json!({
                "session_id": session_id,
                "message": reply,
                "sender": "bot",
            }),
        )
        .await
        .map_err(ChatError::from)?;

    Ok(Json(ChatResponse {
        message: reply,
        session_id,
        timestamp: Utc::now(),
    }))
}
