//! Comment CRUD endpoints
//!
//! JSON bodies are read leniently: a missing, non-JSON or malformed body is
//! handled as an empty object, so create reports the missing fields and
//! update changes nothing. A parsable body with a non-string field is
//! rejected.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use revnote_common::api::{CommentResponse, MessageResponse};
use revnote_common::validation::normalize_keyword;
use serde_json::Value;
use tracing::{debug, info};

use super::extract::{read_payload, CommentId};
use crate::{ApiError, ApiResult, AppState};

fn not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Comment with id {} not found", id))
}

/// GET /api/comments
pub async fn list_comments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = state.store.list().await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// GET /api/comments/type/:comment_type
///
/// Case-insensitive match; zero matches is a 404.
pub async fn list_comments_by_type(
    State(state): State<AppState>,
    Path(comment_type): Path<String>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comment_type = normalize_keyword(&comment_type);
    let comments = state.store.list_by_type(&comment_type).await?;

    if comments.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No comments found for type '{}'",
            comment_type
        )));
    }

    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// GET /api/comments/:id
pub async fn get_comment(
    State(state): State<AppState>,
    CommentId(id): CommentId,
) -> ApiResult<Json<CommentResponse>> {
    let comment = state.store.get(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(comment.into()))
}

/// POST /api/comments
///
/// **Request:** `{"comment": "...", "comment_type": "spelling", "severity": "high"}`
///
/// **Errors:**
/// - 400 Bad Request: empty `comment`/`comment_type`, type not allowed, or a
///   field that is not a string
pub async fn create_comment(
    State(state): State<AppState>,
    body: Option<Json<Value>>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let fields = read_payload(body)?.into_new_comment().map_err(|e| {
        debug!("Rejected comment creation: {}", e);
        e
    })?;
    let comment = state.store.create(&fields).await?;

    info!("Created comment {}", comment.id);
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// PUT /api/comments/:id
///
/// Partial update of `comment`, `comment_type` and `severity`. The id is
/// checked before the body is validated.
pub async fn update_comment(
    State(state): State<AppState>,
    CommentId(id): CommentId,
    body: Option<Json<Value>>,
) -> ApiResult<Json<CommentResponse>> {
    if state.store.get(id).await?.is_none() {
        return Err(not_found(id));
    }

    let patch = read_payload(body)?.into_patch()?;
    let comment = state
        .store
        .update(id, &patch)
        .await?
        .ok_or_else(|| not_found(id))?;

    info!("Updated comment {}", id);
    Ok(Json(comment.into()))
}

/// DELETE /api/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    CommentId(id): CommentId,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.delete(id).await? {
        return Err(ApiError::NotFound(format!(
            "Comment with ID {} not found.",
            id
        )));
    }

    info!("Deleted comment {}", id);
    Ok(Json(MessageResponse {
        message: format!("Comment {} deleted successfully.", id),
    }))
}

/// Build comment CRUD routes
pub fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/api/comments", get(list_comments).post(create_comment))
        .route("/api/comments/type/:comment_type", get(list_comments_by_type))
        .route(
            "/api/comments/:id",
            get(get_comment).put(update_comment).delete(delete_comment),
        )
}
