use std::sync::OnceLock;

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use regex::Regex;
use serde_json::json;
use tracing::info;

use shared_database::{AppContext, StoreClient};
use shared_models::auth::{Account, AuthResponse, LoginRequest, RegisterRequest};
use shared_utils::jwt::sign_token;

use crate::models::AuthCellError;

const TOKEN_TTL_HOURS: i64 = 24 * 7;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn validate_register(request: &RegisterRequest) -> Result<(), AuthCellError> {
    let mut invalid = Vec::new();

    if !email_regex().is_match(request.email.trim()) {
        invalid.push("email");
    }
    if request.password.len() < 8 {
        invalid.push("password");
    }
    if request.first_name.trim().is_empty() {
        invalid.push("first_name");
    }
    if request.last_name.trim().is_empty() {
        invalid.push("last_name");
    }
    if request.phone.trim().is_empty() {
        invalid.push("phone");
    }

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(AuthCellError::Validation(invalid.join(", ")))
    }
}

pub struct AccountService<'a> {
    store: &'a StoreClient,
    jwt_secret: &'a str,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            store: &ctx.store,
            jwt_secret: &ctx.config.jwt_secret,
        }
    }

    fn issue_token(&self, account: &Account) -> Result<String, AuthCellError> {
        sign_token(
            &account.id.to_string(),
            &account.email,
            &account.role,
            self.jwt_secret,
            TOKEN_TTL_HOURS,
        )
        .map_err(AuthCellError::Token)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, AuthCellError> {
        validate_register(&request)?;
        let email = request.email.trim().to_lowercase();

        let existing: Vec<Account> = self
            .store
            .select(
                "accounts",
                &format!("email=eq.{}", urlencoding::encode(&email)),
            )
            .await?;
        if !existing.is_empty() {
            return Err(AuthCellError::EmailTaken);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(request.password.as_bytes(), &salt)
            .map_err(|e| AuthCellError::Hash(e.to_string()))?
            .to_string();

        let account: Account = self
            .store
            .insert(
                "accounts",
                "",
                json!({
                    "email": email,
                    "password_hash": password_hash,
                    "first_name": request.first_name.trim(),
                    "last_name": request.last_name.trim(),
                    "phone": request.phone.trim(),
                    "role": "patient",
                }),
            )
            .await?;

        info!("Registered account {} ({})", account.id, account.email);
        let token = self.issue_token(&account)?;
        Ok(AuthResponse {
            token,
            user: account,
        })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse, AuthCellError> {
        let email = request.email.trim().to_lowercase();
        // Encoded so plus-addressed emails survive the query string.
        let mut accounts: Vec<Account> = self
            .store
            .select(
                "accounts",
                &format!("email=eq.{}", urlencoding::encode(&email)),
            )
            .await?;
        // Same answer for unknown email and wrong password.
        let account = accounts.pop().ok_or(AuthCellError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&account.password_hash)
            .map_err(|e| AuthCellError::Hash(e.to_string()))?;
        if Argon2::default()
            .verify_password(request.password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AuthCellError::InvalidCredentials);
        }

        info!("Account {} logged in", account.id);
        let token = self.issue_token(&account)?;
        Ok(AuthResponse {
            token,
            user: account,
        })
    }

    pub async fn profile(&self, user_id: &str) -> Result<Account, AuthCellError> {
        let mut accounts: Vec<Account> = self
            .store
            .select("accounts", &format!("id=eq.{}", user_id))
            .await?;
        accounts.pop().ok_or(AuthCellError::AccountNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegisterRequest {
        RegisterRequest {
            email: "jane@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            phone: "555-0199".to_string(),
        }
    }

    #[test]
    fn accepts_complete_registration() {
        assert!(validate_register(&request()).is_ok());
    }

    #[test]
    fn short_password_is_named() {
        let mut req = request();
        req.password = "short".to_string();

        let err = validate_register(&req).unwrap_err();
        match err {
            AuthCellError::Validation(fields) => assert_eq!(fields, "password"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_email_and_blank_name_are_both_reported() {
        let mut req = request();
        req.email = "nope".to_string();
        req.first_name = " ".to_string();

        let err = validate_register(&req).unwrap_err();
        match err {
            AuthCellError::Validation(fields) => assert_eq!(fields, "email, first_name"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
