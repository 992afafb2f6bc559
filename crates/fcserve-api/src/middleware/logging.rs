//! Request/response logging middleware.
//!
//! One line per request, tagged with the flow the path selects and the
//! model file it names so engine runs can be matched to their requests.

use std::time::Instant;

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, warn};

/// Flow and file name addressed by a request path.
///
/// `/info/bracket.FCStd` gives `("info", Some("bracket.FCStd"))`; `/list`
/// gives `("list", None)`. Paths outside the flows give `("-", None)`.
fn route_target(path: &str) -> (&'static str, Option<&str>) {
    let trimmed = path.trim_start_matches('/');
    let (head, rest) = match trimmed.split_once('/') {
        Some((head, rest)) => (head, Some(rest)),
        None => (trimmed, None),
    };

    let flow = match head {
        "list" => "list",
        "info" => "info",
        "build" => "build",
        "health" => "health",
        _ => return ("-", None),
    };

    (flow, rest.filter(|r| !r.is_empty()))
}

/// Logs flow, file, method, status, response size and duration.
///
/// Server errors are logged at `warn`; the handler has already logged the
/// cause.
pub async fn request_logging(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();
    let bytes = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let (flow, file) = route_target(&path);

    if response.status().is_server_error() {
        warn!(flow, file, %method, status, bytes, elapsed_ms, "Flow request failed");
    } else {
        info!(flow, file, %method, status, bytes, elapsed_ms, "Flow request");
    }

    response
}
