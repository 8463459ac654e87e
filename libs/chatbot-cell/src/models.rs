use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use shared_database::StoreError;
use shared_models::error::AppError;

/// Row in the `chat_messages` table. `sender` is either "user" or "bot".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: String,
    pub message: String,
    pub sender: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Message is required")]
    EmptyMessage,

    #[error("assistant LLM error: {0}")]
    Llm(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage => AppError::Validation("Message is required".to_string()),
            ChatError::Llm(msg) => AppError::ExternalService(msg),
            ChatError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
