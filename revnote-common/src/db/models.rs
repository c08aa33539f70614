//! Database models

use serde::{Deserialize, Serialize};

/// One stored feedback annotation (row of the `comments` table)
///
/// Text columns are nullable: rows created through the API always carry
/// `comment` and `comment_type`, but bulk-loaded rows are stored as read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub comment: Option<String>,
    pub comment_type: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub example_fix: Option<String>,
}

/// Field set for inserting a new row; the id is assigned by the store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub comment: Option<String>,
    pub comment_type: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub example_fix: Option<String>,
}

/// Partial update; `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPatch {
    pub comment: Option<String>,
    pub comment_type: Option<String>,
    pub severity: Option<String>,
}

impl CommentPatch {
    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.comment_type.is_none() && self.severity.is_none()
    }
}
