//! Failure-path integration tests: every way a call can go wrong must land
//! in the envelope with the matching tagged failure.

mod common;

use std::time::Duration;

use courier::{CallOptions, Client, Failure, Json, StatusCode};
use rstest::rstest;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::Widget;

fn client() -> Client {
    Client::new().expect("default client")
}

#[rstest]
#[case(400)]
#[case(404)]
#[case(500)]
#[tokio::test]
async fn error_status_populates_envelope(#[case] status: u16) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets/42"))
        .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
        .mount(&mock_server)
        .await;

    let response = client()
        .get::<Json<Widget>>(
            &format!("{}/widgets/42", mock_server.uri()),
            &CallOptions::default(),
        )
        .await;

    let status = StatusCode::from_u16(status).expect("valid test status");
    assert!(!response.success);
    assert_eq!(response.status, Some(status));
    assert!(response.payload.is_none());
    assert_eq!(response.raw_body.as_deref(), Some(&b"nope"[..]));
    assert_eq!(response.failure, Some(Failure::Status { status }));
}

#[tokio::test]
async fn unreachable_host_yields_transport_failure() {
    // Port 1 is privileged and unbound; connections are refused immediately.
    let response = client()
        .get::<String>("http://127.0.0.1:1/", &CallOptions::default())
        .await;

    assert!(!response.success);
    assert_eq!(response.status, None);
    assert!(response.headers.is_empty());
    assert!(matches!(response.failure, Some(Failure::Transport { .. })));
}

#[tokio::test]
async fn malformed_json_is_a_decode_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/widgets/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let response = client()
        .get::<Json<Widget>>(
            &format!("{}/widgets/42", mock_server.uri()),
            &CallOptions::default(),
        )
        .await;

    assert!(!response.success);
    assert_eq!(response.status, Some(StatusCode::OK));
    assert!(matches!(response.failure, Some(Failure::Decode { .. })));
    assert_eq!(
        response.raw_body.as_deref(),
        Some(&b"<html>not json</html>"[..])
    );
}

#[tokio::test]
async fn non_utf8_body_fails_text_decode() {
    let mock_server = MockServer::start().await;
    let payload: &[u8] = &[0xff, 0xfe, 0xfd];

    Mock::given(method("GET"))
        .and(path("/blob"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(payload))
        .mount(&mock_server)
        .await;

    let response = client()
        .get::<String>(
            &format!("{}/blob", mock_server.uri()),
            &CallOptions::default(),
        )
        .await;

    assert!(!response.success);
    assert!(matches!(response.failure, Some(Failure::Decode { .. })));
    assert_eq!(response.raw_body.as_deref(), Some(payload));
}

#[tokio::test]
async fn deadline_elapsed_is_a_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let call = CallOptions::default().with_deadline(Duration::from_millis(50));
    let response = client()
        .get::<String>(&format!("{}/slow", mock_server.uri()), &call)
        .await;

    assert!(!response.success);
    assert_eq!(response.status, None);
    assert_eq!(response.failure, Some(Failure::Timeout));
}

#[tokio::test]
async fn duplicate_header_fails_before_dispatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let call = CallOptions::default()
        .with_header("X-Trace", "1")
        .with_header("x-trace", "2");
    let response = client()
        .get::<String>(&mock_server.uri(), &call)
        .await;

    assert!(!response.success);
    assert_eq!(response.status, None);
    assert!(matches!(response.failure, Some(Failure::Build { .. })));
    mock_server.verify().await;
}

#[tokio::test]
async fn managed_header_fails_before_dispatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let call = CallOptions::default().with_header("Authorization", "Bearer sneaky");
    let response = client()
        .get::<String>(&mock_server.uri(), &call)
        .await;

    assert!(!response.success);
    assert!(matches!(response.failure, Some(Failure::Build { .. })));
    mock_server.verify().await;
}

#[tokio::test]
async fn unknown_scheme_fails_before_dispatch() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let call = CallOptions::default().with_scheme("hmac").with_token("tok");
    let response = client()
        .get::<String>(&mock_server.uri(), &call)
        .await;

    assert!(!response.success);
    assert_eq!(
        response.failure,
        Some(Failure::UnknownScheme {
            scheme: "hmac".into()
        })
    );
    mock_server.verify().await;
}
