//! Request extractors shared by the comment endpoints

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
    Json,
};
use revnote_common::api::CommentPayload;
use serde_json::Value;
use tracing::debug;

use crate::{ApiError, ApiResult};

/// Numeric `:id` path segment
///
/// A segment that is not an integer matches no comment, so it is answered
/// with 404 rather than axum's plain-text 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CommentId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(CommentId(id)),
            Err(rejection) => {
                debug!("Rejected comment id in {}: {}", parts.uri.path(), rejection);
                Err(ApiError::NotFound("Not Found".to_string()))
            }
        }
    }
}

/// Turn an optional JSON body into a [`CommentPayload`]
///
/// A missing body, a non-JSON content type or unparsable JSON reads as an
/// empty object. Well-formed JSON with a wrongly typed field is a 400.
pub fn read_payload(body: Option<Json<Value>>) -> ApiResult<CommentPayload> {
    match body {
        Some(Json(value)) => Ok(CommentPayload::from_json(value)?),
        None => Ok(CommentPayload::default()),
    }
}
