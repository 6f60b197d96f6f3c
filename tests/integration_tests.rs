//! Integration tests for the remote logger
//!
//! These tests verify:
//! - Construction validation before any network activity
//! - Acceptance semantics for every level method
//! - Wire format of delivered events (headers and body)
//! - Visibility of post-construction config mutation
//! - Tolerance of endpoint failures (non-2xx never reaches the caller)

use remote_logger::{FieldValue, LogContext, Logger, LoggerConfig, LoggerError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> LoggerConfig {
    LoggerConfig {
        url: format!("{}/v1/log", server.uri()),
        credential: "dXNlcjpwYXNz".to_string(),
        release: "2.0.1".to_string(),
        locale: "zh_HK".to_string(),
        location: "HK_HKG".to_string(),
        environment: "staging".to_string(),
        platform: "webapp".to_string(),
        app_type: Some("user".to_string()),
        client_id: None,
    }
}

async fn received_bodies(server: &MockServer, expected: usize) -> Vec<serde_json::Value> {
    for _ in 0..200 {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= expected {
            return requests
                .iter()
                .map(|r| serde_json::from_slice(&r.body).expect("delivery body is JSON"))
                .collect();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    let requests = server.received_requests().await.unwrap_or_default();
    requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).expect("delivery body is JSON"))
        .collect()
}

#[tokio::test]
async fn test_delivery_carries_headers_and_canonical_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/log"))
        .and(header("Content-Type", "application/json; charset=utf-8"))
        .and(header("Authorization", "Basic dXNlcjpwYXNz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    assert!(logger.info("order accepted"));

    let bodies = received_bodies(&server, 1).await;
    assert_eq!(bodies.len(), 1);

    let event = &bodies[0];
    assert_eq!(event["level"], "info");
    assert_eq!(event["message"], "order accepted");
    assert!(event["time"].as_str().unwrap().ends_with('Z'));
    assert!(event["src_file"].is_string());
    assert!(event["src_line"].is_string());

    let context = &event["context"];
    assert_eq!(context["release"], "2.0.1");
    assert_eq!(context["locale"], "zh_HK");
    assert_eq!(context["location"], "HK_HKG");
    assert_eq!(context["environment"], "staging");
    assert_eq!(context["platform"], "webapp");
    assert_eq!(context["app_type"], "user");
    assert!(context["agent"].is_string());
    assert!(context["url"].is_string());
    assert!(context.get("client_id").is_none());
}

#[tokio::test]
async fn test_caller_context_merged_with_config_precedence() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    let context = LogContext::new()
        .with_field("order_id", 42)
        .with_field("location", "SPOOFED");
    assert!(logger.warning_with_context("slow checkout", context));

    let bodies = received_bodies(&server, 1).await;
    let context = &bodies[0]["context"];
    assert_eq!(context["order_id"], 42);
    // Config-derived keys win on collision
    assert_eq!(context["location"], "HK_HKG");
    assert_eq!(bodies[0]["level"], "warning");
}

#[tokio::test]
async fn test_location_change_is_visible_to_next_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    logger.set_location("TW_TPE");
    assert!(logger.info("x"));

    let bodies = received_bodies(&server, 1).await;
    assert_eq!(bodies[0]["context"]["location"], "TW_TPE");
}

#[tokio::test]
async fn test_client_id_lifecycle_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    logger.set_client_id(Some(FieldValue::Int(20)));
    assert!(logger.info("with id"));
    logger.set_client_id(None);
    assert!(logger.info("without id"));

    let bodies = received_bodies(&server, 2).await;
    let with_id = bodies
        .iter()
        .find(|b| b["message"] == "with id")
        .expect("first event delivered");
    let without_id = bodies
        .iter()
        .find(|b| b["message"] == "without id")
        .expect("second event delivered");

    assert_eq!(with_id["context"]["client_id"], 20);
    assert!(without_id["context"].get("client_id").is_none());
}

#[tokio::test]
async fn test_unauthorized_endpoint_does_not_reach_the_caller() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    // Acceptance means "dispatch initiated", not "endpoint accepted it"
    assert!(logger.error("still fine"));

    let bodies = received_bodies(&server, 1).await;
    assert_eq!(bodies.len(), 1);
}

#[tokio::test]
async fn test_unreachable_endpoint_does_not_reach_the_caller() {
    let server = MockServer::start().await;
    let mut config = config_for(&server);
    config.url = "http://127.0.0.1:9/unroutable".to_string();

    let logger = Logger::new(config).unwrap();
    assert!(logger.fatal("network is down"));
}

#[tokio::test]
async fn test_empty_message_triggers_no_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    assert!(!logger.info(""));
    assert!(!logger.debug(""));

    tokio::time::sleep(Duration::from_millis(100)).await;
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_missing_required_field_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.credential = String::new();

    let err = Logger::new(config).unwrap_err();
    assert!(matches!(
        err,
        LoggerError::MissingField {
            field: "credential"
        }
    ));

    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_error_with_backtrace_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    assert!(logger.error_with_backtrace(
        "unhandled rejection",
        None,
        "at https://example.com/app.js:12:5"
    ));

    let bodies = received_bodies(&server, 1).await;
    assert_eq!(bodies[0]["backtrace"], "at https://example.com/app.js:12:5");
}

#[tokio::test]
async fn test_uncaught_forwarding_delivers_error_event() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let logger = Logger::new(config_for(&server)).unwrap();
    let accepted = tokio::task::spawn_blocking(move || {
        logger.handle_uncaught(
            "Uncaught TypeError",
            "https://example.com/app.js",
            12,
            5,
            Some("TypeError\n    at https://example.com/app.js:12:5"),
        )
    })
    .await
    .unwrap();
    assert!(accepted);

    let bodies = received_bodies(&server, 1).await;
    assert_eq!(bodies[0]["level"], "error");
    assert_eq!(bodies[0]["src_file"], "https://example.com/app.js");
    assert_eq!(bodies[0]["src_line"], "12");
}

#[test]
fn test_dispatch_outside_a_runtime_uses_blocking_path() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server),
    );

    let logger = Logger::new(config_for(&server)).unwrap();
    // This thread has no runtime context, so delivery happens on a detached
    // thread with the blocking client
    assert!(logger.info("sync world"));

    let bodies = runtime.block_on(received_bodies(&server, 1));
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["message"], "sync world");
}
