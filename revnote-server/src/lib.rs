//! revnote-server library - review comment service
//!
//! Stores review comments in SQLite and exposes them over a JSON REST API,
//! with a CSV bulk loader and an edit-form endpoint for the HTML front end.

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;
pub mod loader;

pub use crate::error::{ApiError, ApiResult};
use crate::db::CommentStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Sole owner of the comments table
    pub store: CommentStore,
    /// CSV file read by `POST /api/comments/load`
    pub source_path: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, source_path: impl Into<PathBuf>) -> Self {
        Self {
            store: CommentStore::new(db),
            source_path: source_path.into(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::load_routes())
        .merge(api::comment_routes())
        .merge(api::debug_routes())
        .merge(api::edit_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
