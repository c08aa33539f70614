//! Bulk load trigger

use axum::{extract::State, routing::post, Json, Router};
use revnote_common::api::LoadResponse;
use tracing::info;

use crate::{loader, ApiResult, AppState};

/// POST /api/comments/load
///
/// Replaces every stored comment with the rows of the configured CSV
/// source.
///
/// **Errors:**
/// - 404 Not Found: source file does not exist (store untouched)
/// - 500 Internal Server Error: unreadable CSV or database failure
pub async fn load_comments(State(state): State<AppState>) -> ApiResult<Json<LoadResponse>> {
    info!("Bulk load requested from {}", state.source_path.display());

    let rows = loader::load_comments(&state.store, &state.source_path).await?;

    Ok(Json(LoadResponse {
        message: "CSV data loaded successfully".to_string(),
        rows,
    }))
}

pub fn load_routes() -> Router<AppState> {
    Router::new().route("/api/comments/load", post(load_comments))
}
