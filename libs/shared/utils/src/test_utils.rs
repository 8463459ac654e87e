use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::AppContext;
use shared_models::auth::User;

use crate::jwt::sign_token;

pub struct TestConfig {
    pub jwt_secret: String,
    pub base_url: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            base_url: "http://localhost:54321".to_string(),
        }
    }
}

impl TestConfig {
    /// Point every external endpoint at one mock server. Tests register
    /// distinct paths on it for the store, mail relay, Stripe and the LLM.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            database_rest_url: self.base_url.clone(),
            database_service_key: "test-service-key".to_string(),
            jwt_secret: self.jwt_secret.clone(),
            mail_api_url: format!("{}/mail", self.base_url),
            mail_api_token: "test-mail-token".to_string(),
            mail_from: "SmileCare Dental Clinic <noreply@smilecare.com>".to_string(),
            admin_email: "admin@smilecare.com".to_string(),
            stripe_api_url: self.base_url.clone(),
            stripe_secret_key: "sk_test_123".to_string(),
            openai_api_url: self.base_url.clone(),
            openai_api_key: String::new(),
            port: 5000,
        }
    }

    pub fn to_context(&self) -> Arc<AppContext> {
        Arc::new(AppContext::new(self.to_app_config()))
    }
}

pub struct TestUser {
    pub id: String,
    pub email: String,
    pub role: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: "test@example.com".to_string(),
            role: "patient".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(email: &str, role: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(email: &str) -> Self {
        Self::new(email, "patient")
    }

    pub fn admin(email: &str) -> Self {
        Self::new(email, "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: Some(self.email.clone()),
            role: Some(self.role.clone()),
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        sign_token(
            &user.id,
            &user.email,
            &user.role,
            secret,
            exp_hours.unwrap_or(24),
        )
        .expect("test token signing")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn service_row(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Teeth Whitening",
            "description": "Professional teeth whitening treatment",
            "price": 299.0,
            "duration_minutes": 60,
            "category": "Cosmetic",
            "is_active": true
        })
    }

    pub fn doctor_row(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "first_name": "Sarah",
            "last_name": "Johnson",
            "specialization": "General Dentistry",
            "email": "sarah.johnson@smilecare.com",
            "phone": "555-0101",
            "bio": "General dentist with a focus on preventive care",
            "years_of_experience": 12,
            "rating": 4.8
        })
    }

    pub fn appointment_row(
        id: &str,
        doctor_id: &str,
        service_id: &str,
        status: &str,
    ) -> serde_json::Value {
        json!({
            "id": id,
            "patient_name": "Jane Doe",
            "patient_email": "jane@example.com",
            "patient_phone": "555-0199",
            "service_id": service_id,
            "doctor_id": doctor_id,
            "appointment_date": "2026-09-15",
            "appointment_time": "09:00",
            "notes": null,
            "status": status,
            "created_at": Utc::now().to_rfc3339()
        })
    }

    pub fn account_row(id: &str, email: &str, password_hash: &str) -> serde_json::Value {
        json!({
            "id": id,
            "email": email,
            "password_hash": password_hash,
            "first_name": "Jane",
            "last_name": "Doe",
            "phone": "555-0199",
            "role": "patient",
            "created_at": Utc::now().to_rfc3339()
        })
    }
}
