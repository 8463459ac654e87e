use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::AppConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store rejected a write that violates a unique constraint. The
    /// booking workflow maps this onto its slot-conflict error, so the
    /// partial unique index on (doctor_id, appointment_date, appointment_time)
    /// is what ultimately serializes concurrent bookings.
    #[error("unique constraint violation: {0}")]
    Conflict(String),

    #[error("store API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("store transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode store response: {0}")]
    Decode(String),
}

/// REST client for the record store (a PostgREST endpoint). One instance is
/// created at startup and shared through [`AppContext`]; handlers never build
/// their own connection.
pub struct StoreClient {
    client: Client,
    base_url: String,
    service_key: String,
}

impl StoreClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.database_rest_url.trim_end_matches('/').to_string(),
            service_key: config.database_service_key.clone(),
        }
    }

    fn headers(&self, returning: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Ok(key) = HeaderValue::from_str(&self.service_key) {
            headers.insert("apikey", key);
        }
        if let Ok(bearer) = HeaderValue::from_str(&format!("Bearer {}", self.service_key)) {
            headers.insert(AUTHORIZATION, bearer);
        }
        if returning {
            headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        }
        headers
    }

    async fn request<T>(
        &self,
        method: Method,
        table: &str,
        query: &str,
        body: Option<Value>,
        returning: bool,
    ) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = if query.is_empty() {
            format!("{}/rest/v1/{}", self.base_url, table)
        } else {
            format!("{}/rest/v1/{}?{}", self.base_url, table, query)
        };
        debug!("Store request: {} {}", method, url);

        let mut req = self
            .client
            .request(method, &url)
            .headers(self.headers(returning))
            .timeout(REQUEST_TIMEOUT);
        if let Some(body) = body {
            req = req.json(&body);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Store API error ({}): {}", status, message);
            if status == StatusCode::CONFLICT {
                return Err(StoreError::Conflict(message));
            }
            return Err(StoreError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Fetch rows matching a PostgREST filter string such as
    /// `doctor_id=eq.<uuid>&status=neq.cancelled&order=created_at.desc`.
    pub async fn select<T>(&self, table: &str, query: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::GET, table, query, None, false).await
    }

    /// Insert one row and return its representation. `query` carries the
    /// `select=` embedding for the echoed row, if any.
    pub async fn insert<T>(&self, table: &str, query: &str, body: Value) -> Result<T, StoreError>
    where
        T: DeserializeOwned,
    {
        let mut rows: Vec<T> = self
            .request(Method::POST, table, query, Some(body), true)
            .await?;
        if rows.is_empty() {
            return Err(StoreError::Decode(format!(
                "insert into {} returned no representation",
                table
            )));
        }
        Ok(rows.remove(0))
    }

    /// Patch matching rows and return their updated representations.
    pub async fn update<T>(&self, table: &str, query: &str, body: Value) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::PATCH, table, query, Some(body), true)
            .await
    }

    /// Delete matching rows, returning what was removed so callers can tell
    /// a successful delete from a miss.
    pub async fn delete<T>(&self, table: &str, query: &str) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        self.request(Method::DELETE, table, query, None, true).await
    }
}

/// Shared application state: configuration plus the store handle, built once
/// in `main` and injected into every router.
pub struct AppContext {
    pub config: AppConfig,
    pub store: StoreClient,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let store = StoreClient::new(&config);
        Self { config, store }
    }
}
