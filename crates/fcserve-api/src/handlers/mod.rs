//! Route handlers, one module per flow.

pub mod build;
pub mod health;
pub mod info;
pub mod list;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;

use fcserve_core::error::AppError;
use fcserve_engine::{EngineError, OutputArtifact};

use crate::error::ApiError;

/// HEAD on `/list` and `/info/...`: empty 200 without running the flow.
pub async fn head_empty() -> Response {
    let mut response = Response::new(Body::empty());
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, header::HeaderValue::from_static("0"));
    response
}

/// `/info/` or `/build/` without a file name.
pub async fn missing_file_name() -> ApiError {
    EngineError::MissingFileName.into()
}

/// Any method a route does not accept.
pub async fn method_not_allowed() -> ApiError {
    AppError::method_not_allowed("Method not allowed").into()
}

/// Unknown path.
pub async fn not_found() -> ApiError {
    AppError::not_found("Not found").into()
}

/// Turn an engine artifact into a 200 response carrying its bytes.
pub(crate) fn artifact_response(artifact: OutputArtifact) -> Result<Response, ApiError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, artifact.content_type)
        .header(header::CONTENT_LENGTH, artifact.len());

    if let Some(filename) = artifact.suggested_filename {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        );
    }

    builder
        .body(Body::from(artifact.bytes))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}
