//! List flow.

use axum::Json;
use axum::extract::State;

use crate::dto::response::ListResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /list
pub async fn list_models(State(state): State<AppState>) -> Result<Json<ListResponse>, ApiError> {
    let files = state.pipeline.list().await?;
    Ok(Json(ListResponse { files }))
}
