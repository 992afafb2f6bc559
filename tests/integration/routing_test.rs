//! Integration tests for request validation and method handling.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_file_name_is_bad_request() {
    let app = TestApp::new();

    let response = app.request("GET", "/info/", b"").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "File name is required");

    let response = app.request("POST", "/build/", b"{}").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_build_requires_post() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");

    for method in ["GET", "PUT", "DELETE"] {
        let response = app.request(method, "/build/model.FCStd", b"").await;
        assert_eq!(response.status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
    }
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_traversal_is_rejected() {
    let app = TestApp::new();
    std::fs::write(app.temp_root.path().join("secret.FCStd"), b"secret").expect("write");

    for uri in ["/info/..%2Fsecret.FCStd", "/info/..", "/info/%2E%2E"] {
        let response = app.request("GET", uri, b"").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{uri}");
    }

    let response = app
        .request("POST", "/build/..%2F..%2Fetc%2Fpasswd", b"{}")
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    assert_eq!(app.leftover_workspaces(), vec!["secret.FCStd".to_string()]);
}

#[tokio::test]
async fn test_unencoded_multi_segment_name_is_rejected() {
    let app = TestApp::new();
    app.add_model("model.FCStd", b"model");
    std::fs::create_dir(app.models.path().join("sub")).expect("mkdir");
    std::fs::write(app.models.path().join("sub").join("model.FCStd"), b"model").expect("write");

    for (method, uri) in [
        ("GET", "/info/../secret.FCStd"),
        ("GET", "/info/sub/model.FCStd"),
        ("POST", "/build/a/b.FCStd"),
        ("POST", "/build/sub/model.FCStd"),
    ] {
        let response = app.request(method, uri, b"{}").await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {uri}");
    }

    let response = app.request("HEAD", "/info/a/b", b"").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-length"), Some("0"));

    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_reserved_input_name_is_rejected() {
    let app = TestApp::new();
    app.add_model("output.json", b"{}");

    let response = app.request("GET", "/info/output.json", b"").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_info_runs_for_names_only_build_stages() {
    let app = TestApp::new();
    app.add_model("config.json", b"{}");

    let response = app.request("GET", "/info/config.json", b"").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["root_obj"], "Body");
    assert!(app.leftover_workspaces().is_empty());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = TestApp::new();

    let response = app.request("GET", "/convert/model.FCStd", b"").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
