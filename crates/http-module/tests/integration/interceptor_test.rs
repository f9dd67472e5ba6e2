//! Logging and custom interceptors against a mock server

use crate::test_utils::{LogEntry, UNREACHABLE_URL, recorded_service, recorded_service_with};
use http_module::client::{ClientRequestConfig, RequestConfig};
use mockito::Server;
use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[tokio::test]
async fn test_request_and_response_are_logged_in_order() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/test")
        .with_status(200)
        .with_body(r#"{"data":"test"}"#)
        .create_async()
        .await;

    let base_url = server.url();
    let (service, logger) = recorded_service(&base_url, true);
    service.get("/test", None).await.expect("GET");

    assert_eq!(
        logger.entries(),
        vec![
            LogEntry::Info(format!("HTTP Request: GET {base_url}/test")),
            LogEntry::Info(format!("HTTP Response: 200 GET {base_url}/test")),
        ]
    );
}

#[tokio::test]
async fn test_response_log_uses_actual_status() {
    let mut server = Server::new_async().await;
    server
        .mock("DELETE", "/items/9")
        .with_status(404)
        .create_async()
        .await;

    let base_url = server.url();
    let (service, logger) = recorded_service(&base_url, true);
    service.delete("/items/9", None).await.expect("404 is Ok");

    assert_eq!(
        logger.messages().last().map(String::as_str),
        Some(format!("HTTP Response: 404 DELETE {base_url}/items/9").as_str())
    );
}

#[tokio::test]
async fn test_disabled_logging_emits_nothing() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/test").with_status(200).create_async().await;

    let (service, logger) = recorded_service(&server.url(), false);
    service.get("/test", None).await.expect("GET");

    assert!(logger.entries().is_empty());
}

#[tokio::test]
async fn test_network_error_is_logged_and_returned() {
    let (service, logger) = recorded_service_with(
        ClientRequestConfig::new()
            .with_base_url(UNREACHABLE_URL)
            .with_connect_timeout(Duration::from_secs(2))
            .with_logging(true),
    );

    let error = service.get("/test", None).await.expect_err("connection fails");

    assert_eq!(
        logger.messages(),
        vec![format!("HTTP Request: GET {UNREACHABLE_URL}/test")]
    );
    let errors = logger.errors();
    assert_eq!(errors.len(), 1);
    let (message, trace) = &errors[0];
    assert_eq!(message, &format!("HTTP Error: {error}"));
    assert!(trace.as_deref().is_some_and(|t| t.contains("caused by")));
}

#[tokio::test]
async fn test_error_status_goes_through_error_interceptor() {
    let mut server = Server::new_async().await;
    server.mock("GET", "/missing").with_status(404).create_async().await;

    let (service, logger) = recorded_service_with(
        ClientRequestConfig::new()
            .with_base_url(server.url())
            .with_error_for_status(true)
            .with_logging(true),
    );
    let error = service.get("/missing", None).await.expect_err("404 is Err");

    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(logger.messages().len(), 1);
    assert_eq!(logger.errors().len(), 1);
}

#[tokio::test]
async fn test_invalid_request_reaches_error_interceptor() {
    let (service, logger) = recorded_service(UNREACHABLE_URL, true);

    let error = service
        .get(
            "/test",
            Some(RequestConfig::new().with_header("bad header", "value")),
        )
        .await
        .expect_err("invalid header");

    assert!(error.is_builder());
    assert!(logger.messages().is_empty());
    assert_eq!(logger.errors().len(), 1);
}

#[tokio::test]
async fn test_custom_error_hook_receives_the_error() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = Arc::clone(&seen);

    let (service, logger) = recorded_service_with(
        ClientRequestConfig::new()
            .with_base_url(UNREACHABLE_URL)
            .with_connect_timeout(Duration::from_secs(2))
            .with_logging(true)
            .on_error(move |error| {
                recorder
                    .lock()
                    .expect("lock")
                    .push(error.to_string());
                error
            }),
    );

    let error = service.get("/test", None).await.expect_err("connection fails");

    assert_eq!(*seen.lock().expect("lock"), vec![error.to_string()]);
    // The default request interceptor still runs; only the error one is replaced.
    assert_eq!(logger.messages().len(), 1);
    assert!(logger.errors().is_empty());
}

#[tokio::test]
async fn test_custom_request_hook_can_modify_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/test")
        .match_header("x-injected", "yes")
        .with_status(200)
        .create_async()
        .await;

    let base_url = server.url();
    let (service, logger) = recorded_service_with(
        ClientRequestConfig::new()
            .with_base_url(&base_url)
            .with_logging(true)
            .on_request(|mut request| {
                request
                    .request
                    .headers_mut()
                    .insert("x-injected", HeaderValue::from_static("yes"));
                request
            }),
    );
    service.get("/test", None).await.expect("GET");

    mock.assert_async().await;
    assert_eq!(
        logger.messages(),
        vec![format!("HTTP Response: 200 GET {base_url}/test")]
    );
}

#[tokio::test]
async fn test_custom_response_hook_shapes_the_result() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/test")
        .with_status(200)
        .with_body("original")
        .create_async()
        .await;

    let (service, logger) = recorded_service_with(
        ClientRequestConfig::new()
            .with_base_url(server.url())
            .with_logging(true)
            .on_response(|mut response| {
                response.data = b"intercepted".to_vec();
                response
            }),
    );
    let response = service.get("/test", None).await.expect("GET");

    assert_eq!(response.text(), "intercepted");
    assert_eq!(logger.messages().len(), 1);
}

#[tokio::test]
async fn test_hooks_are_ignored_when_logging_is_disabled() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/test")
        .with_status(200)
        .with_body("original")
        .create_async()
        .await;

    let (service, _logger) = recorded_service_with(
        ClientRequestConfig::new()
            .with_base_url(server.url())
            .on_response(|mut response| {
                response.data = b"intercepted".to_vec();
                response
            }),
    );
    let response = service.get("/test", None).await.expect("GET");

    assert_eq!(response.text(), "original");
}
