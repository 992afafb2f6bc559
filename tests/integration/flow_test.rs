//! Integration tests for the list, info and build flows.

use axum::http::StatusCode;

use tokio::task::JoinSet;

use crate::helpers::{TestApp, send};

#[tokio::test]
async fn test_list_returns_only_model_files() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");
    app.add_model("notes.txt", b"notes");
    std::fs::create_dir(app.models.path().join("sub.FCStd")).expect("mkdir");

    let response = app.request("GET", "/list", b"").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert_eq!(response.json(), serde_json::json!({ "files": ["model.FCStd"] }));
}

#[tokio::test]
async fn test_list_reflects_directory_changes() {
    let app = TestApp::new();

    let response = app.request("GET", "/list", b"").await;
    assert_eq!(response.json(), serde_json::json!({ "files": [] }));

    app.add_model("a.FCStd", b"a");
    let response = app.request("GET", "/list", b"").await;
    assert_eq!(response.json(), serde_json::json!({ "files": ["a.FCStd"] }));

    app.remove_model("a.FCStd");
    let response = app.request("GET", "/list", b"").await;
    assert_eq!(response.json(), serde_json::json!({ "files": [] }));
}

#[tokio::test]
async fn test_info_returns_engine_json() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");

    let response = app.request("GET", "/info/model.FCStd", b"").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert!(response.header("content-disposition").is_none());

    let body = response.json();
    assert_eq!(body["root_obj"], "Body");
    assert_eq!(body["variables"]["width"], 10);
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_build_returns_download() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");

    let response = app
        .request("POST", "/build/model.FCStd", br#"{"format":"stl"}"#)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"output.stl\"")
    );
    assert_eq!(
        response.header("content-length"),
        Some(response.body.len().to_string().as_str())
    );
    assert!(!response.body.is_empty());
    assert!(response.body.starts_with(b"solid fake\n"));
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_build_passes_body_verbatim() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");

    // Not JSON: the server does not parse the build configuration.
    let payload = b"width=42\nnot json at all";
    let response = app.request("POST", "/build/model.FCStd", payload).await;

    assert_eq!(response.status, StatusCode::OK);
    let mut expected = b"solid fake\n".to_vec();
    expected.extend_from_slice(payload);
    assert_eq!(response.body, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_builds_are_isolated() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");

    let mut set = JoinSet::new();
    for i in 0..6 {
        let router = app.router.clone();
        set.spawn(async move {
            let payload = format!("{{\"width\":{i}}}");
            let body = payload.clone().into_bytes();
            let response = send(router, "POST", "/build/model.FCStd", body).await;
            (payload, response)
        });
    }

    while let Some(joined) = set.join_next().await {
        let (payload, response) = joined.expect("request task panicked");
        assert_eq!(response.status, StatusCode::OK);
        let body = String::from_utf8(response.body).expect("utf8");
        assert!(body.ends_with(&payload), "{body} should carry {payload}");
    }
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_head_skips_the_flow() {
    let app = TestApp::new();

    for uri in ["/list", "/info/x", "/info/missing.FCStd"] {
        let response = app.request("HEAD", uri, b"").await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");
        assert_eq!(response.header("content-length"), Some("0"), "{uri}");
        assert!(response.body.is_empty());
    }
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_health_reports_engine_counters() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");
    app.request("GET", "/info/model.FCStd", b"").await;

    let response = app.request("GET", "/health", b"").await;

    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["engine"]["invocations_started"], 1);
    assert_eq!(body["engine"]["invocations_succeeded"], 1);
}
