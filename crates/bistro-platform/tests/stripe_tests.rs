//! Payment Processor Client Tests
//!
//! Tests for the payment-intent bridge against a mock processor:
//! - Form-encoded request shape (amount, currency, payment method)
//! - Bearer authentication with the secret key
//! - Error-body and malformed-response mapping

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bistro_platform::payment::stripe::to_minor_units;
use bistro_platform::{BistroError, StripeClient};

#[tokio::test]
async fn test_intent_request_shape_and_secret_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .and(header("Authorization", "Bearer sk_test_123"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("amount=2500"))
        .and(body_string_contains("currency=usd"))
        .and(body_string_contains("payment_method_types%5B%5D=card"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "pi_3OaX",
            "client_secret": "pi_3OaX_secret_abc",
            "status": "requires_payment_method"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StripeClient::with_api_base("sk_test_123", mock_server.uri());
    let secret = client
        .create_payment_intent(to_minor_units(25.00))
        .await
        .unwrap();

    assert_eq!(secret, "pi_3OaX_secret_abc");
}

#[tokio::test]
async fn test_processor_error_body_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "type": "invalid_request_error",
                "message": "Amount must be at least 50 cents"
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StripeClient::with_api_base("sk_test_123", mock_server.uri());
    let err = client.create_payment_intent(10).await.unwrap_err();

    match err {
        BistroError::PaymentProvider { message } => {
            assert!(message.contains("at least 50 cents"));
        }
        other => panic!("expected PaymentProvider, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unparseable_error_reports_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream blew up"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StripeClient::with_api_base("sk_test_123", mock_server.uri());
    let err = client.create_payment_intent(2500).await.unwrap_err();

    match err {
        BistroError::PaymentProvider { message } => {
            assert!(message.contains("500"));
        }
        other => panic!("expected PaymentProvider, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_success_body_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/payment_intents"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = StripeClient::with_api_base("sk_test_123", mock_server.uri());
    let err = client.create_payment_intent(2500).await.unwrap_err();

    assert!(matches!(err, BistroError::PaymentProvider { .. }));
}
