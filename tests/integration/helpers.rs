//! Shared test helpers for integration tests.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use fcserve_api::{AppState, build_router};
use fcserve_core::config::AppConfig;
use fcserve_engine::{Asset, AssetStore, Pipeline};

/// Stand-in for `FreeCADCmd`.
///
/// Invoked as `engine -c <script> --pass <args...>`. Two trailing args mean
/// the info flow (input, output); three mean build (input, config, output).
/// Behaviour is steered by the staged input name (info) or the config body
/// (build): `fail` exits non-zero, `nooutput` exits cleanly without writing,
/// `hang` never finishes.
const FAKE_ENGINE: &str = r#"#!/bin/sh
shift 3
if [ "$#" -eq 2 ]; then
    input="$1"
    output="$2"
    case "$(basename "$input")" in
        *fail*) echo "cannot open $input" >&2; exit 1 ;;
        *nooutput*) exit 0 ;;
        *hang*) exec sleep 30 ;;
    esac
    printf '{"root_obj":"Body","variables":{"width":10}}' > "$output"
else
    config="$2"
    output="$3"
    case "$(cat "$config")" in
        *fail*) echo "bad config" >&2; exit 1 ;;
        *nooutput*) exit 0 ;;
        *hang*) exec sleep 30 ;;
    esac
    { echo "solid fake"; cat "$config"; } > "$output"
fi
"#;

/// Path of the fake engine, written once per test binary.
///
/// Written before any test can spawn a child, so no forked process still
/// holds the file open for writing when it is executed.
pub fn fake_engine() -> &'static Path {
    static ENGINE: OnceLock<(TempDir, PathBuf)> = OnceLock::new();

    let (_, path) = ENGINE.get_or_init(|| {
        let dir = tempfile::tempdir().expect("Failed to create engine dir");
        let path = dir.path().join("FreeCADCmd");
        std::fs::write(&path, FAKE_ENGINE).expect("Failed to write fake engine");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
                .expect("Failed to mark fake engine executable");
        }

        (dir, path)
    });
    path
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Models directory served by the catalog
    pub models: TempDir,
    /// Root under which request workspaces are created
    pub temp_root: TempDir,
}

impl TestApp {
    /// Create a new test application backed by the fake engine
    pub fn new() -> Self {
        Self::with_config(|_| {})
    }

    /// Create a test application, adjusting configuration first
    pub fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Self {
        let engine = fake_engine();
        let models = tempfile::tempdir().expect("Failed to create models dir");
        let temp_root = tempfile::tempdir().expect("Failed to create temp root");

        let mut config = AppConfig::default();
        config.catalog.directory = models.path().to_path_buf();
        config.engine.temp_root = Some(temp_root.path().to_path_buf());
        config.engine.executable = engine.to_string_lossy().into_owned();
        adjust(&mut config);

        let assets = AssetStore::new(
            Asset::new("info.py", &b"# info"[..]),
            Asset::new("generate.py", &b"# generate"[..]),
        );
        let pipeline = Pipeline::new(&config, Arc::new(assets)).expect("Failed to build pipeline");
        let router = build_router(AppState::new(config, pipeline));

        Self {
            router,
            models,
            temp_root,
        }
    }

    /// Place a model file in the models directory
    pub fn add_model(&self, name: &str, content: &[u8]) {
        std::fs::write(self.models.path().join(name), content).expect("Failed to write model");
    }

    /// Remove a model file from the models directory
    pub fn remove_model(&self, name: &str) {
        std::fs::remove_file(self.models.path().join(name)).expect("Failed to remove model");
    }

    /// Entries currently left under the workspace root
    pub fn leftover_workspaces(&self) -> Vec<String> {
        std::fs::read_dir(self.temp_root.path())
            .expect("Failed to read temp root")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    /// Make an HTTP request to the test app
    pub async fn request(&self, method: &str, path: &str, body: &[u8]) -> TestResponse {
        send(self.router.clone(), method, path, body.to_vec()).await
    }
}

/// Send one request through a router, buffering the whole response.
pub async fn send(router: Router, method: &str, path: &str, body: Vec<u8>) -> TestResponse {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::from(body))
        .expect("Failed to build request");

    let response = router.oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
        .await
        .expect("Failed to read body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("Body is not JSON")
    }

    /// A header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
