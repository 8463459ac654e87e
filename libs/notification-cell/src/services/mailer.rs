use std::time::Duration;

use serde_json::json;
use thiserror::Error;
use tracing::{error, info, warn};

use shared_config::AppConfig;

use crate::models::BookingNotice;
use crate::templates;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum MailError {
    #[error("mail relay not configured")]
    NotConfigured,

    #[error("mail relay error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("mail transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the transactional mail relay.
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_token: String,
    from: String,
    admin_email: String,
}

impl Mailer {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.mail_api_url.clone(),
            api_token: config.mail_api_token.clone(),
            from: config.mail_from.clone(),
            admin_email: config.admin_email.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), MailError> {
        if self.api_url.is_empty() || self.api_token.is_empty() {
            return Err(MailError::NotConfigured);
        }

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "html": html,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        info!("Sent mail to {}: {}", to, subject);
        Ok(())
    }
}

fn log_outcome(result: Result<(), MailError>, what: &str, to: &str) {
    match result {
        Ok(()) => {}
        Err(MailError::NotConfigured) => {
            warn!("Skipped {} mail to {}: relay not configured", what, to)
        }
        Err(e) => error!("Failed to send {} mail to {}: {}", what, to, e),
    }
}

/// Fire-and-forget notices for a fresh booking: one to the patient, one to
/// the admin inbox. Failures are logged and never surface to the caller.
pub fn dispatch_booking_notices(config: &AppConfig, notice: BookingNotice) {
    let mailer = Mailer::new(config);
    tokio::spawn(async move {
        let (subject, html) = templates::booking_confirmation(&notice);
        let result = mailer.send(&notice.patient_email, &subject, &html).await;
        log_outcome(result, "booking confirmation", &notice.patient_email);

        let (subject, html) = templates::admin_new_booking(&notice);
        let result = mailer.send(&mailer.admin_email, &subject, &html).await;
        log_outcome(result, "admin booking", &mailer.admin_email);
    });
}

/// Fire-and-forget notice for a status change to confirmed.
pub fn dispatch_confirmed_notice(config: &AppConfig, notice: BookingNotice) {
    let mailer = Mailer::new(config);
    tokio::spawn(async move {
        let (subject, html) = templates::appointment_confirmed(&notice);
        let result = mailer.send(&notice.patient_email, &subject, &html).await;
        log_outcome(result, "confirmation", &notice.patient_email);
    });
}

/// Fire-and-forget notice for a status change to cancelled.
pub fn dispatch_cancelled_notice(config: &AppConfig, notice: BookingNotice) {
    let mailer = Mailer::new(config);
    tokio::spawn(async move {
        let (subject, html) = templates::appointment_cancelled(&notice);
        let result = mailer.send(&notice.patient_email, &subject, &html).await;
        log_outcome(result, "cancellation", &notice.patient_email);
    });
}
