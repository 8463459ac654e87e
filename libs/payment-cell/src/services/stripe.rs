use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use shared_config::AppConfig;

use crate::models::PaymentError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub status: String,
    pub client_secret: Option<String>,
    pub payment_method: Option<String>,
}

/// Thin client for the processor's payment-intents API. Requests are
/// form-encoded, responses are JSON.
pub struct StripeClient {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.stripe_api_url.trim_end_matches('/').to_string(),
            secret_key: config.stripe_secret_key.clone(),
        }
    }

    pub async fn create_intent(
        &self,
        amount_cents: i64,
        currency: &str,
        appointment_id: &str,
        user_id: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", currency.to_string()),
            ("metadata[appointment_id]", appointment_id.to_string()),
            ("metadata[user_id]", user_id.to_string()),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_url))
            .basic_auth(&self.secret_key, None::<&str>)
            .timeout(REQUEST_TIMEOUT)
            .form(&params)
            .send()
            .await
            .map_err(|e| PaymentError::Processor(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Processor(format!(
                "create intent failed ({}): {}",
                status, message
            )));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| PaymentError::Processor(e.to_string()))?;
        debug!("Created payment intent {} for {} cents", intent.id, amount_cents);
        Ok(intent)
    }

    pub async fn retrieve_intent(&self, intent_id: &str) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .get(format!("{}/v1/payment_intents/{}", self.api_url, intent_id))
            .basic_auth(&self.secret_key, None::<&str>)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| PaymentError::Processor(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Processor(format!(
                "retrieve intent failed ({}): {}",
                status, message
            )));
        }

        response
            .json()
            .await
            .map_err(|e| PaymentError::Processor(e.to_string()))
    }
}
