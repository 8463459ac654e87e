use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use notification_cell::{BookingNotice, MailError, Mailer};
use shared_utils::test_utils::TestConfig;

/// Detached dispatches land after the call returns; poll for them.
async fn wait_for_mail(mock_server: &MockServer, count: usize) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let received = mock_server.received_requests().await.unwrap_or_default();
        if received.len() >= count || tokio::time::Instant::now() >= deadline {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn sample_notice() -> BookingNotice {
    BookingNotice {
        patient_name: "Jane Doe".to_string(),
        patient_email: "jane@example.com".to_string(),
        service_name: "Teeth Whitening".to_string(),
        service_price: 299.0,
        doctor_name: "Dr. Sarah Johnson".to_string(),
        appointment_date: "2026-09-15".to_string(),
        appointment_time: "09:00".to_string(),
    }
}

#[tokio::test]
async fn send_posts_message_to_relay() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    Mock::given(method("POST"))
        .and(path("/mail"))
        .and(header("authorization", "Bearer test-mail-token"))
        .and(body_partial_json(json!({
            "from": "SmileCare Dental Clinic <noreply@smilecare.com>",
            "to": "jane@example.com",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg_1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mailer = Mailer::new(&config);
    mailer
        .send("jane@example.com", "Hello", "<p>Hi</p>")
        .await
        .unwrap();
}

#[tokio::test]
async fn send_surfaces_relay_errors() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    Mock::given(method("POST"))
        .and(path("/mail"))
        .respond_with(ResponseTemplate::new(422).set_body_string("bad recipient"))
        .mount(&mock_server)
        .await;

    let mailer = Mailer::new(&config);
    let err = mailer
        .send("nobody", "Hello", "<p>Hi</p>")
        .await
        .unwrap_err();

    assert_matches!(err, MailError::Api { status: 422, .. });
}

#[tokio::test]
async fn send_refuses_when_unconfigured() {
    let mut config = TestConfig::default().to_app_config();
    config.mail_api_token = String::new();

    let mailer = Mailer::new(&config);
    let err = mailer
        .send("jane@example.com", "Hello", "<p>Hi</p>")
        .await
        .unwrap_err();

    assert_matches!(err, MailError::NotConfigured);
}

#[tokio::test]
async fn booking_dispatch_notifies_patient_and_admin() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_base_url(&mock_server.uri()).to_app_config();

    Mock::given(method("POST"))
        .and(path("/mail"))
        .and(body_partial_json(json!({"to": "jane@example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg_1"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/mail"))
        .and(body_partial_json(json!({"to": "admin@smilecare.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "msg_2"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    notification_cell::dispatch_booking_notices(&config, sample_notice());

    wait_for_mail(&mock_server, 2).await;
}
