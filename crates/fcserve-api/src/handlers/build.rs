//! Build flow.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::Response;

use super::artifact_response;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /build/{*filename}
///
/// The request body is handed to the engine verbatim as `config.json`.
pub async fn build_model(
    State(state): State<AppState>,
    Path(filename): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let artifact = state.pipeline.build(&filename, &body).await?;
    artifact_response(artifact)
}
