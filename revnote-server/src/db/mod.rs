//! Database access layer for revnote-server
//!
//! The `comments` table is owned by [`CommentStore`]; handlers reach it only
//! through the store held in `AppState`.

mod comments;

pub use comments::CommentStore;
