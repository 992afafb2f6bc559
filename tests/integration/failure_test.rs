//! Integration tests for engine and input failures.
//!
//! Every failure must answer with an error status and leave no workspace
//! behind.

use std::time::{Duration, Instant};

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_source_is_server_error() {
    let app = TestApp::new();

    let response = app.request("GET", "/info/absent.FCStd", b"").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let response = app.request("POST", "/build/absent.FCStd", b"{}").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_engine_failure_hides_streams() {
    let app = TestApp::new();
    app.add_model("fail.FCStd", b"model");

    let response = app.request("GET", "/info/fail.FCStd", b"").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert_eq!(body["error"], "ENGINE_ERROR");
    assert!(
        !body["message"]
            .as_str()
            .unwrap_or_default()
            .contains("cannot open"),
        "engine stderr leaked: {body}"
    );
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_build_engine_failure() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");

    let response = app
        .request("POST", "/build/model.FCStd", br#"{"mode":"fail"}"#)
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_missing_output_is_server_error() {
    let app = TestApp::new();
    app.add_model("nooutput.FCStd", b"model");

    let response = app.request("GET", "/info/nooutput.FCStd", b"").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let response = app
        .request("POST", "/build/nooutput.FCStd", br#"{"mode":"nooutput"}"#)
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let health = app.request("GET", "/health", b"").await.json();
    assert_eq!(health["engine"]["outputs_missing"], 2);
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_hung_engine_is_killed_after_timeout() {
    let app = TestApp::with_config(|config| config.engine.timeout_seconds = 1);
    app.add_model("hang.FCStd", b"model");

    let started = Instant::now();
    let response = app.request("GET", "/info/hang.FCStd", b"").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(started.elapsed() < Duration::from_secs(20));

    let health = app.request("GET", "/health", b"").await.json();
    assert_eq!(health["engine"]["invocations_timed_out"], 1);
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_missing_engine_is_server_error() {
    let app = TestApp::with_config(|config| {
        config.engine.executable = "/nonexistent/FreeCADCmd".to_string();
    });
    app.add_model("model.FCStd", b"model");

    let response = app.request("GET", "/info/model.FCStd", b"").await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(app.leftover_workspaces().is_empty());
}
