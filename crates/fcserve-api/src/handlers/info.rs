//! Info flow.

use axum::extract::{Path, State};
use axum::response::Response;

use super::artifact_response;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /info/{*filename}
pub async fn model_info(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let artifact = state.pipeline.info(&filename).await?;
    artifact_response(artifact)
}
