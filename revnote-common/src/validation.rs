//! Input normalization and enum validation
//!
//! Single home for the rules applied by every write path of the API:
//! JSON create, JSON partial update and the edit-form submission.
//! The bulk loader deliberately bypasses these checks.

use crate::{Error, Result};

/// Comment types accepted by create, update and edit-form paths (sorted)
pub const ALLOWED_COMMENT_TYPES: [&str; 3] = ["spelling", "structure", "terminology"];

/// Severities accepted by the edit-form path (sorted)
///
/// The JSON create/update paths only lower-case severity and do not check
/// membership.
pub const ALLOWED_SEVERITIES: [&str; 3] = ["high", "low", "medium"];

/// Severity stored when creation omits it
pub const DEFAULT_SEVERITY: &str = "medium";

/// Trim surrounding whitespace from a free-text field
pub fn normalize_text(value: &str) -> String {
    value.trim().to_string()
}

/// Trim and lower-case an enum-like field (`comment_type`, `severity`)
pub fn normalize_keyword(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Check a normalized comment type against [`ALLOWED_COMMENT_TYPES`]
pub fn validate_comment_type(comment_type: &str) -> Result<()> {
    if ALLOWED_COMMENT_TYPES.contains(&comment_type) {
        Ok(())
    } else {
        Err(Error::InvalidInput(allowed_values_message(
            "comment_type",
            &ALLOWED_COMMENT_TYPES,
        )))
    }
}

/// Check a normalized severity against [`ALLOWED_SEVERITIES`]
pub fn validate_severity(severity: &str) -> Result<()> {
    if ALLOWED_SEVERITIES.contains(&severity) {
        Ok(())
    } else {
        Err(Error::InvalidInput(allowed_values_message(
            "severity",
            &ALLOWED_SEVERITIES,
        )))
    }
}

/// Render `field must be one of ['a', 'b', 'c']`
fn allowed_values_message(field: &str, allowed: &[&str]) -> String {
    let quoted: Vec<String> = allowed.iter().map(|v| format!("'{}'", v)).collect();
    format!("{} must be one of [{}]", field, quoted.join(", "))
}

/// Presentation casing: first character upper-cased, remainder lower-cased
///
/// Empty and missing values render as `None`.
///
/// # Examples
/// ```
/// use revnote_common::validation::display_case;
///
/// assert_eq!(display_case(Some("spelling")).as_deref(), Some("Spelling"));
/// assert_eq!(display_case(Some("hIGH")).as_deref(), Some("High"));
/// assert_eq!(display_case(Some("")), None);
/// assert_eq!(display_case(None), None);
/// ```
pub fn display_case(value: Option<&str>) -> Option<String> {
    let value = value?;
    let mut chars = value.chars();
    let first = chars.next()?;
    Some(
        first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
    )
}
