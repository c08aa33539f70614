//! Edit-form submission
//!
//! Backs the HTML edit page. The page itself is rendered elsewhere; this
//! endpoint only validates the submitted form, applies it and redirects to
//! the listing view. Errors are plain text rather than JSON.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::post,
    Form, Router,
};
use revnote_common::api::{EditForm, EditFormError};
use tracing::{info, warn};

use super::extract::CommentId;
use crate::{ApiError, AppState};

/// Where the browser lands after a successful edit
pub const LISTING_PATH: &str = "/";

/// Edit-form failures
#[derive(Debug)]
pub enum FormError {
    NotFound(i64),
    Invalid(EditFormError),
    Store(revnote_common::Error),
}

impl From<revnote_common::Error> for FormError {
    fn from(err: revnote_common::Error) -> Self {
        FormError::Store(err)
    }
}

impl IntoResponse for FormError {
    fn into_response(self) -> Response {
        match self {
            FormError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Comment with id {} not found", id),
            )
                .into_response(),
            FormError::Invalid(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            FormError::Store(err) => ApiError::from(err).into_response(),
        }
    }
}

/// POST /comments/:id/edit
///
/// All three fields are replaced; severity must be low/medium/high here.
pub async fn submit_edit_form(
    State(state): State<AppState>,
    CommentId(id): CommentId,
    form: Option<Form<EditForm>>,
) -> Result<Redirect, FormError> {
    let Form(form) = form.unwrap_or_default();

    if state.store.get(id).await?.is_none() {
        return Err(FormError::NotFound(id));
    }

    let patch = form.into_patch().map_err(|e| {
        warn!("Rejected edit of comment {}: {}", id, e);
        FormError::Invalid(e)
    })?;

    state
        .store
        .update(id, &patch)
        .await?
        .ok_or(FormError::NotFound(id))?;

    info!("Comment {} updated from edit form", id);
    Ok(Redirect::to(LISTING_PATH))
}

pub fn edit_routes() -> Router<AppState> {
    Router::new().route("/comments/:id/edit", post(submit_edit_form))
}
