use thiserror::Error;

use shared_database::StoreError;
use shared_models::error::AppError;

#[derive(Error, Debug)]
pub enum AuthCellError {
    #[error("Missing or invalid fields: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not found")]
    AccountNotFound,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token signing failed: {0}")]
    Token(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl From<AuthCellError> for AppError {
    fn from(err: AuthCellError) -> Self {
        match err {
            AuthCellError::Validation(msg) => {
                AppError::Validation(format!("Missing or invalid fields: {}", msg))
            }
            AuthCellError::EmailTaken => AppError::Conflict("Email already registered".to_string()),
            AuthCellError::InvalidCredentials => AppError::Auth("Invalid credentials".to_string()),
            AuthCellError::AccountNotFound => AppError::NotFound("Account not found".to_string()),
            AuthCellError::Hash(msg) => AppError::Internal(msg),
            AuthCellError::Token(msg) => AppError::Internal(msg),
            AuthCellError::Store(e) => AppError::Database(e.to_string()),
        }
    }
}
