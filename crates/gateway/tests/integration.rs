//! Gateway client tests against a mock HTTP server.

use std::time::Duration;

use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use courier_gateway::{GatewayClient, GatewayError, SendOutcome};

fn client(api_url: &str, token: Option<&str>) -> GatewayClient {
    GatewayClient::new(
        api_url,
        token.map(str::to_string),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn test_send_text_posts_json_with_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/messages/send"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(serde_json::json!({
            "number": "5516996246673",
            "body": "hello"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "m1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&format!("{}/api/messages/send", server.uri()), Some("secret"));
    let outcome = client.send_text("5516996246673", "hello").await.unwrap();

    assert_eq!(
        outcome,
        SendOutcome::Sent(serde_json::json!({"id": "m1"}))
    );
}

#[tokio::test]
async fn test_send_text_non_success_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid number"))
        .mount(&server)
        .await;

    let client = client(&server.uri(), Some("secret"));
    let err = client.send_text("5516996246673", "hello").await.unwrap_err();

    match err {
        GatewayError::Status { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "invalid number");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_text_empty_number_skips_without_call() {
    let server = MockServer::start().await;
    // No mocks mounted: any request would 404 and the test below would fail
    let client = client(&server.uri(), Some("secret"));

    let outcome = client.send_text("", "hello").await.unwrap();

    assert_eq!(outcome, SendOutcome::Skipped);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_text_without_token_fails_before_network() {
    let server = MockServer::start().await;
    let client = client(&server.uri(), None);

    let err = client.send_text("5516996246673", "hello").await.unwrap_err();

    assert!(matches!(err, GatewayError::MissingToken));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_media_posts_multipart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "m2"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri(), Some("secret"));
    let outcome = client
        .send_media("5516996246673", b"%PDF-1.4".to_vec(), "boleto.pdf")
        .await
        .unwrap();

    assert!(matches!(outcome, SendOutcome::Sent(_)));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));

    let raw = String::from_utf8_lossy(&requests[0].body);
    assert!(raw.contains("name=\"medias\""));
    assert!(raw.contains("filename=\"boleto.pdf\""));
    assert!(raw.contains("name=\"number\""));
}

#[tokio::test]
async fn test_fetch_document_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/billet/123.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.4 billet".to_vec()))
        .mount(&server)
        .await;

    let client = client(&server.uri(), Some("secret"));
    let bytes = client
        .fetch_document(&format!("{}/billet/123.pdf", server.uri()))
        .await
        .unwrap();

    assert_eq!(bytes, b"%PDF-1.4 billet");
}

#[tokio::test]
async fn test_fetch_document_non_success_is_document_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    let client = client(&server.uri(), Some("secret"));
    let err = client
        .fetch_document(&format!("{}/billet/missing.pdf", server.uri()))
        .await
        .unwrap_err();

    match err {
        GatewayError::Document { status, .. } => assert_eq!(status, 404),
        other => panic!("expected document error, got {other:?}"),
    }
}
