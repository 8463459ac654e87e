use axum::extract::{Extension, State};
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use payment_cell::handlers;
use payment_cell::models::{ConfirmPaymentRequest, CreateIntentRequest};
use shared_models::error::AppError;
use shared_utils::test_utils::{MockStoreResponses, TestConfig, TestUser};

fn payment_row(appointment_id: &str, intent_id: &str, status: &str) -> Value {
    json!({
        "id": Uuid::new_v4(),
        "appointment_id": appointment_id,
        "user_id": Uuid::new_v4().to_string(),
        "amount": 299.0,
        "currency": "usd",
        "status": status,
        "payment_method": if status == "COMPLETED" { json!("pm_card_visa") } else { Value::Null },
        "stripe_payment_id": intent_id,
        "created_at": Utc::now().to_rfc3339()
    })
}

fn appointment_with_service(appointment_id: &str) -> Value {
    let service_id = Uuid::new_v4().to_string();
    let doctor_id = Uuid::new_v4().to_string();
    let mut row =
        MockStoreResponses::appointment_row(appointment_id, &doctor_id, &service_id, "pending");
    row["service"] = MockStoreResponses::service_row(&service_id);
    row["doctor"] = MockStoreResponses::doctor_row(&doctor_id);
    row
}

#[tokio::test]
async fn create_intent_charges_price_in_cents() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();
    let appointment_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            appointment_with_service(&appointment_id.to_string())
        ])))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(body_string_contains("amount=29900"))
        .and(body_string_contains("currency=usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pi_123",
            "status": "requires_payment_method",
            "client_secret": "pi_123_secret_abc",
            "payment_method": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/payments"))
        .and(body_string_contains("\"status\":\"PENDING\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            payment_row(&appointment_id.to_string(), "pi_123", "PENDING")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = TestUser::patient("jane@example.com");
    let Json(response) = handlers::create_payment_intent(
        State(ctx),
        Extension(user.to_user()),
        Json(CreateIntentRequest { appointment_id }),
    )
    .await
    .unwrap();

    assert_eq!(response.client_secret, "pi_123_secret_abc");
    assert_eq!(response.amount, 29900);
}

#[tokio::test]
async fn create_intent_for_missing_appointment_is_not_found() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let user = TestUser::patient("jane@example.com");
    let err = handlers::create_payment_intent(
        State(ctx),
        Extension(user.to_user()),
        Json(CreateIntentRequest {
            appointment_id: Uuid::new_v4(),
        }),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::NotFound(_));
}

#[tokio::test]
async fn confirming_a_succeeded_intent_completes_payment_and_appointment() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();
    let appointment_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/payment_intents/pi_123$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pi_123",
            "status": "succeeded",
            "client_secret": "pi_123_secret_abc",
            "payment_method": "pm_card_visa"
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/payments"))
        .and(body_string_contains("\"status\":\"COMPLETED\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            payment_row(&appointment_id, "pi_123", "COMPLETED")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(body_string_contains("confirmed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let user = TestUser::patient("jane@example.com");
    let Json(body) = handlers::confirm_payment(
        State(ctx),
        Extension(user.to_user()),
        Json(ConfirmPaymentRequest {
            payment_intent_id: "pi_123".to_string(),
        }),
    )
    .await
    .unwrap();

    assert_eq!(body["message"], "Payment confirmed");
    assert_eq!(body["payment"]["status"], "COMPLETED");
}

#[tokio::test]
async fn confirming_an_unsettled_intent_is_rejected() {
    let mock_server = MockServer::start().await;
    let ctx = TestConfig::with_base_url(&mock_server.uri()).to_context();

    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/payment_intents/pi_456$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pi_456",
            "status": "requires_payment_method",
            "client_secret": "pi_456_secret_abc",
            "payment_method": null
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/payments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let user = TestUser::patient("jane@example.com");
    let err = handlers::confirm_payment(
        State(ctx),
        Extension(user.to_user()),
        Json(ConfirmPaymentRequest {
            payment_intent_id: "pi_456".to_string(),
        }),
    )
    .await
    .unwrap_err();

    assert_matches!(err, AppError::BadRequest(_));
}
