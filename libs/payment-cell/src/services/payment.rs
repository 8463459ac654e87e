use serde_json::json;
use tracing::info;

use appointment_cell::models::{Appointment, AppointmentStatus, BookingError};
use appointment_cell::services::booking::BookingService;
use shared_database::{AppContext, StoreClient};
use shared_models::auth::User;

use crate::models::{CreateIntentResponse, Payment, PaymentError, PaymentStatus};
use crate::services::stripe::StripeClient;

const CURRENCY: &str = "usd";

/// Price in processor minor units. Prices are stored with at most two
/// decimals, so rounding only irons out float noise.
pub fn amount_in_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

pub struct PaymentService<'a> {
    store: &'a StoreClient,
    stripe: StripeClient,
}

impl<'a> PaymentService<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self {
            store: &ctx.store,
            stripe: StripeClient::new(&ctx.config),
        }
    }

    async fn load_appointment(&self, appointment_id: &str) -> Result<Appointment, PaymentError> {
        BookingService::new(self.store)
            .get(appointment_id)
            .await
            .map_err(|e| match e {
                BookingError::AppointmentNotFound => PaymentError::AppointmentNotFound,
                BookingError::Store(inner) => PaymentError::Store(inner),
                other => PaymentError::Processor(other.to_string()),
            })
    }

    /// Open an intent with the processor for the appointment's service price
    /// and record a pending payment row against it.
    pub async fn create_intent(
        &self,
        appointment_id: &str,
        user: &User,
    ) -> Result<CreateIntentResponse, PaymentError> {
        let appointment = self.load_appointment(appointment_id).await?;
        let service = appointment
            .service
            .as_ref()
            .ok_or(PaymentError::AppointmentNotFound)?;

        let amount = amount_in_cents(service.price);
        let intent = self
            .stripe
            .create_intent(amount, CURRENCY, &appointment.id.to_string(), &user.id)
            .await?;

        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Processor("intent carries no client secret".to_string()))?;

        let payment: Payment = self
            .store
            .insert(
                "payments",
                "",
                json!({
                    "appointment_id": appointment.id,
                    "user_id": user.id,
                    "amount": service.price,
                    "currency": CURRENCY,
                    "status": PaymentStatus::Pending,
                    "stripe_payment_id": intent.id,
                }),
            )
            .await?;

        info!(
            "Opened payment {} for appointment {} ({} cents)",
            payment.id, appointment.id, amount
        );
        Ok(CreateIntentResponse {
            client_secret,
            amount,
        })
    }

    /// Settle a payment after the client-side flow finishes. Only an intent
    /// the processor reports as succeeded completes the payment and confirms
    /// the appointment.
    pub async fn confirm(&self, payment_intent_id: &str) -> Result<Payment, PaymentError> {
        let intent = self.stripe.retrieve_intent(payment_intent_id).await?;
        if intent.status != "succeeded" {
            return Err(PaymentError::NotCompleted);
        }

        let mut payments: Vec<Payment> = self
            .store
            .update(
                "payments",
                &format!("stripe_payment_id=eq.{}", payment_intent_id),
                json!({
                    "status": PaymentStatus::Completed,
                    "payment_method": intent.payment_method,
                }),
            )
            .await?;
        if payments.is_empty() {
            return Err(PaymentError::PaymentNotFound);
        }
        let payment = payments.remove(0);

        let _: Vec<serde_json::Value> = self
            .store
            .update(
                "appointments",
                &format!("id=eq.{}", payment.appointment_id),
                json!({ "status": AppointmentStatus::Confirmed.to_string() }),
            )
            .await?;

        info!(
            "Payment {} completed, appointment {} confirmed",
            payment.id, payment.appointment_id
        );
        Ok(payment)
    }
}
