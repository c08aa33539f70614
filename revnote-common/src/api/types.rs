//! Shared API request/response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::db::{Comment, CommentPatch, NewComment};
use crate::validation::{
    display_case, normalize_keyword, normalize_text, validate_comment_type, validate_severity,
    DEFAULT_SEVERITY,
};
use crate::{Error, Result};

// ========================================
// Request Types
// ========================================

/// JSON body for `POST /api/comments` and `PUT /api/comments/{id}`
///
/// Every field is optional so that an absent field (`None`) can be told
/// apart from one sent as an empty string (`Some("")`). JSON `null` counts
/// as absent.
///
/// # Examples
///
/// ```
/// use revnote_common::api::types::CommentPayload;
///
/// let payload: CommentPayload =
///     serde_json::from_str(r#"{"comment":" Teh quick fox ","comment_type":"Spelling"}"#).unwrap();
/// let new = payload.into_new_comment().unwrap();
/// assert_eq!(new.comment.as_deref(), Some("Teh quick fox"));
/// assert_eq!(new.comment_type.as_deref(), Some("spelling"));
/// assert_eq!(new.severity.as_deref(), Some("medium"));
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CommentPayload {
    pub comment: Option<String>,
    pub comment_type: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub example_fix: Option<String>,
}

impl CommentPayload {
    /// Read the fields of a parsed JSON body
    ///
    /// A body that is not an object counts as empty. Each known field must
    /// be a string or `null`; any other JSON type is rejected with an error
    /// naming the field. Unknown fields are ignored.
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Ok(Self::default());
        };

        let mut field = |name: &str| match map.remove(name) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(Error::InvalidInput(format!(
                "Field '{}' must be a string.",
                name
            ))),
        };

        Ok(Self {
            comment: field("comment")?,
            comment_type: field("comment_type")?,
            severity: field("severity")?,
            category: field("category")?,
            example_fix: field("example_fix")?,
        })
    }

    /// Normalize and validate for creation
    ///
    /// `comment` and `comment_type` must be non-empty after trimming and the
    /// type must be allowed. An absent or empty severity becomes `"medium"`;
    /// severity membership is not checked on this path.
    ///
    /// An absent (or `null`) `category`/`example_fix` is stored as NULL, not
    /// as an empty string; a supplied value is trimmed and kept even when it
    /// ends up empty.
    pub fn into_new_comment(self) -> Result<NewComment> {
        let comment = normalize_text(self.comment.as_deref().unwrap_or_default());
        let comment_type = normalize_keyword(self.comment_type.as_deref().unwrap_or_default());
        let severity = match self.severity.as_deref() {
            Some(s) if !s.is_empty() => normalize_keyword(s),
            _ => DEFAULT_SEVERITY.to_string(),
        };

        if comment.is_empty() || comment_type.is_empty() {
            return Err(Error::InvalidInput(
                "Fields 'comment' and 'comment_type' are required.".to_string(),
            ));
        }
        validate_comment_type(&comment_type)?;

        Ok(NewComment {
            comment: Some(comment),
            comment_type: Some(comment_type),
            severity: Some(severity),
            category: self.category.as_deref().map(normalize_text),
            example_fix: self.example_fix.as_deref().map(normalize_text),
        })
    }

    /// Normalize and validate for a partial update
    ///
    /// Only `comment`, `comment_type` and `severity` are applied; the other
    /// fields are ignored.
    pub fn into_patch(self) -> Result<CommentPatch> {
        let comment_type = match self.comment_type.as_deref() {
            Some(t) => {
                let t = normalize_keyword(t);
                validate_comment_type(&t)?;
                Some(t)
            }
            None => None,
        };

        Ok(CommentPatch {
            comment: self.comment.as_deref().map(normalize_text),
            comment_type,
            severity: self.severity.as_deref().map(normalize_keyword),
        })
    }
}

/// URL-encoded body for `POST /comments/{id}/edit`
///
/// Fields missing from the form are read as empty strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EditForm {
    pub comment: String,
    pub comment_type: String,
    pub severity: String,
}

/// Edit-form rejection, rendered to the client as plain text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditFormError {
    #[error("Invalid type")]
    InvalidType,

    #[error("Invalid severity")]
    InvalidSeverity,
}

impl EditForm {
    /// Normalize and validate; all three fields are replaced
    ///
    /// Unlike the JSON path, severity must be one of low/medium/high.
    pub fn into_patch(self) -> std::result::Result<CommentPatch, EditFormError> {
        let comment = normalize_text(&self.comment);
        let comment_type = normalize_keyword(&self.comment_type);
        let severity = normalize_keyword(&self.severity);

        validate_comment_type(&comment_type).map_err(|_| EditFormError::InvalidType)?;
        validate_severity(&severity).map_err(|_| EditFormError::InvalidSeverity)?;

        Ok(CommentPatch {
            comment: Some(comment),
            comment_type: Some(comment_type),
            severity: Some(severity),
        })
    }
}

// ========================================
// Response Types
// ========================================

/// Outward form of a [`Comment`]
///
/// `comment_type` and `severity` use presentation casing ("Spelling").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub comment: Option<String>,
    pub comment_type: Option<String>,
    pub severity: Option<String>,
    pub category: Option<String>,
    pub example_fix: Option<String>,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            comment_type: display_case(c.comment_type.as_deref()),
            severity: display_case(c.severity.as_deref()),
            comment: c.comment,
            category: c.category,
            example_fix: c.example_fix,
        }
    }
}

/// Confirmation body, e.g. after a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by `POST /api/comments/load`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadResponse {
    pub message: String,
    pub rows: u64,
}

/// Error body used by every JSON endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
