//! Diagnostic endpoints

use axum::{extract::State, routing::get, Json, Router};

use crate::{ApiResult, AppState};

/// GET /api/debug/types
///
/// Distinct `comment_type` values exactly as stored (no display casing),
/// sorted, without NULL or empty values. Useful after a bulk load, which
/// does not normalize types.
pub async fn list_comment_types(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    let types = state.store.distinct_types().await?;
    Ok(Json(types))
}

pub fn debug_routes() -> Router<AppState> {
    Router::new().route("/api/debug/types", get(list_comment_types))
}
