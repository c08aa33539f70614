//! Bulk loader: replaces the store's contents from a CSV file
//!
//! Expected header columns: `comment`, `comment-type`, `severity`,
//! `category`, `example_fix`. Extra columns are ignored; missing columns,
//! cells missing from a short row and empty cells become NULL. Rows are
//! stored as read; no normalization or validation happens here.

use revnote_common::db::NewComment;
use revnote_common::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::db::CommentStore;

/// One CSV row, keyed by header name
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourceRow {
    comment: Option<String>,
    #[serde(rename = "comment-type")]
    comment_type: Option<String>,
    severity: Option<String>,
    category: Option<String>,
    example_fix: Option<String>,
}

impl From<SourceRow> for NewComment {
    fn from(row: SourceRow) -> Self {
        Self {
            comment: row.comment,
            comment_type: row.comment_type,
            severity: row.severity,
            category: row.category,
            example_fix: row.example_fix,
        }
    }
}

/// Parse every row of the source file
///
/// Fails with [`Error::NotFound`] when the file does not exist.
pub fn read_source(path: &Path) -> Result<Vec<NewComment>> {
    if !path.exists() {
        return Err(Error::NotFound(format!("{} not found", source_name(path))));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<SourceRow>() {
        rows.push(record?.into());
    }

    Ok(rows)
}

/// Read the source, then replace all stored comments with its rows
///
/// The whole file is parsed on a blocking thread before the store is
/// touched, so a missing or malformed source leaves existing data in place.
pub async fn load_comments(store: &CommentStore, path: &Path) -> Result<u64> {
    let rows = tokio::task::spawn_blocking({
        let path = path.to_path_buf();
        move || read_source(&path)
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))??;

    let loaded = store.replace_all(&rows).await?;

    info!("Loaded {} comments from {}", loaded, path.display());
    Ok(loaded)
}

/// File name used in user-facing messages
pub fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_source_maps_columns() {
        let file = write_csv(
            "comment,comment-type,severity,category,example_fix\n\
             Teh fox,Spelling,High,typo,The fox\n",
        );

        let rows = read_source(file.path()).unwrap();

        assert_eq!(
            rows,
            vec![NewComment {
                comment: Some("Teh fox".to_string()),
                comment_type: Some("Spelling".to_string()),
                severity: Some("High".to_string()),
                category: Some("typo".to_string()),
                example_fix: Some("The fox".to_string()),
            }]
        );
    }

    #[test]
    fn test_read_source_tolerates_missing_and_extra_columns() {
        let file = write_csv("author,comment,comment-type\nsam,Too long,structure\n");

        let rows = read_source(file.path()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment.as_deref(), Some("Too long"));
        assert_eq!(rows[0].severity, None);
        assert_eq!(rows[0].example_fix, None);
    }

    #[test]
    fn test_read_source_empty_cells_are_none() {
        let file = write_csv(
            "comment,comment-type,severity,category,example_fix\n\
             ,grammar,,,\n",
        );

        let rows = read_source(file.path()).unwrap();

        assert_eq!(rows[0].comment, None);
        // No validation on this path
        assert_eq!(rows[0].comment_type.as_deref(), Some("grammar"));
        assert_eq!(rows[0].category, None);
    }

    #[test]
    fn test_read_source_short_rows() {
        let file = write_csv(
            "comment,comment-type,severity,category,example_fix\n\
             Teh fox,spelling,high,typo,The fox\n\
             Short row,structure\n",
        );

        let rows = read_source(file.path()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].comment.as_deref(), Some("Short row"));
        assert_eq!(rows[1].comment_type.as_deref(), Some("structure"));
        assert_eq!(rows[1].severity, None);
        assert_eq!(rows[1].category, None);
        assert_eq!(rows[1].example_fix, None);
    }

    #[tokio::test]
    async fn test_load_comments_replaces_store() {
        let pool = revnote_common::db::init_memory_database()
            .await
            .expect("Should open in-memory database");
        let store = CommentStore::new(pool);
        store
            .create(&NewComment {
                comment: Some("old".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let file = write_csv(
            "comment,comment-type,severity,category,example_fix\n\
             Teh fox,spelling,high,typo,The fox\n\
             Short row,structure\n",
        );

        let loaded = load_comments(&store, file.path()).await.unwrap();

        assert_eq!(loaded, 2);
        let comments = store.list().await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].comment.as_deref(), Some("Short row"));
        assert_eq!(comments[1].severity, None);
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_source(&dir.path().join("comments.csv")).unwrap_err();

        match err {
            Error::NotFound(msg) => assert_eq!(msg, "comments.csv not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
