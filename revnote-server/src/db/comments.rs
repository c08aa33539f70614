//! Comment record store
//!
//! Every operation is a single statement or a single transaction, so other
//! requests never observe a half-applied change.

use revnote_common::db::{Comment, CommentPatch, NewComment};
use revnote_common::Result;
use sqlx::SqlitePool;
use tracing::debug;

const COMMENT_COLUMNS: &str = "id, comment, comment_type, severity, category, example_fix";

/// Owned handle to the `comments` table
#[derive(Debug, Clone)]
pub struct CommentStore {
    pool: SqlitePool,
}

impl CommentStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a record and return it with its assigned id
    pub async fn create(&self, fields: &NewComment) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (comment, comment_type, severity, category, example_fix)
            VALUES (?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        ))
        .bind(&fields.comment)
        .bind(&fields.comment_type)
        .bind(&fields.severity)
        .bind(&fields.category)
        .bind(&fields.example_fix)
        .fetch_one(&self.pool)
        .await?;

        debug!("Inserted comment {}", comment.id);
        Ok(comment)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments WHERE id = ?",
            COMMENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// All records in insertion (ascending id) order
    pub async fn list(&self) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments ORDER BY id ASC",
            COMMENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Records whose `comment_type` equals `comment_type`, ignoring case
    ///
    /// An empty vector is a normal result; the caller decides whether that
    /// is an error.
    pub async fn list_by_type(&self, comment_type: &str) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {} FROM comments WHERE LOWER(comment_type) = LOWER(?) ORDER BY id ASC",
            COMMENT_COLUMNS
        ))
        .bind(comment_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Apply the supplied fields; `Ok(None)` when the id does not exist
    pub async fn update(&self, id: i64, patch: &CommentPatch) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments SET
                comment = COALESCE(?, comment),
                comment_type = COALESCE(?, comment_type),
                severity = COALESCE(?, severity)
            WHERE id = ?
            RETURNING {}
            "#,
            COMMENT_COLUMNS
        ))
        .bind(&patch.comment)
        .bind(&patch.comment_type)
        .bind(&patch.severity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Returns `false` when no record had this id
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Distinct raw `comment_type` values, sorted, without NULL or empty
    pub async fn distinct_types(&self) -> Result<Vec<String>> {
        let types = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT comment_type
            FROM comments
            WHERE comment_type IS NOT NULL AND comment_type <> ''
            ORDER BY comment_type ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(types)
    }

    /// Delete every record, then insert `rows` as new records
    ///
    /// Runs in one transaction: on failure the previous contents remain.
    /// Ids keep increasing from the table's high-water mark.
    pub async fn replace_all(&self, rows: &[NewComment]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM comments")
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let mut inserted = 0;
        for row in rows {
            inserted += sqlx::query(
                r#"
                INSERT INTO comments (comment, comment_type, severity, category, example_fix)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&row.comment)
            .bind(&row.comment_type)
            .bind(&row.severity)
            .bind(&row.category)
            .bind(&row.example_fix)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }

        tx.commit().await?;

        debug!("Replaced {} comments with {}", deleted, inserted);
        Ok(inserted)
    }

    pub async fn count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revnote_common::db::init_memory_database;

    async fn setup_store() -> CommentStore {
        let pool = init_memory_database()
            .await
            .expect("Should open in-memory database");
        CommentStore::new(pool)
    }

    fn fields(comment: &str, comment_type: &str) -> NewComment {
        NewComment {
            comment: Some(comment.to_string()),
            comment_type: Some(comment_type.to_string()),
            severity: Some("medium".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = setup_store().await;

        let a = store.create(&fields("a", "spelling")).await.unwrap();
        let b = store.create(&fields("b", "structure")).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.comment.as_deref(), Some("a"));
        assert_eq!(a.severity.as_deref(), Some("medium"));
        assert_eq!(a.category, None);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let store = setup_store().await;
        assert_eq!(store.get(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let store = setup_store().await;
        for text in ["first", "second", "third"] {
            store.create(&fields(text, "spelling")).await.unwrap();
        }

        let texts: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.comment.unwrap())
            .collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_list_by_type_ignores_case() {
        let store = setup_store().await;
        store.create(&fields("a", "spelling")).await.unwrap();
        store.create(&fields("b", "Spelling")).await.unwrap();
        store.create(&fields("c", "structure")).await.unwrap();

        let lower = store.list_by_type("spelling").await.unwrap();
        let upper = store.list_by_type("SPELLING").await.unwrap();

        assert_eq!(lower.len(), 2);
        assert_eq!(lower, upper);
        assert!(store.list_by_type("terminology").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_applies_only_supplied_fields() {
        let store = setup_store().await;
        let created = store
            .create(&NewComment {
                category: Some("style".to_string()),
                ..fields("orig", "spelling")
            })
            .await
            .unwrap();

        let patch = CommentPatch {
            severity: Some("high".to_string()),
            ..Default::default()
        };
        let updated = store.update(created.id, &patch).await.unwrap().unwrap();

        assert_eq!(updated.severity.as_deref(), Some("high"));
        assert_eq!(updated.comment.as_deref(), Some("orig"));
        assert_eq!(updated.comment_type.as_deref(), Some("spelling"));
        assert_eq!(updated.category.as_deref(), Some("style"));
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let store = setup_store().await;
        let patch = CommentPatch {
            comment: Some("x".to_string()),
            ..Default::default()
        };
        assert_eq!(store.update(9999, &patch).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = setup_store().await;
        let created = store.create(&fields("a", "spelling")).await.unwrap();

        assert!(store.delete(created.id).await.unwrap());
        assert!(!store.delete(created.id).await.unwrap());
        assert_eq!(store.get(created.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_distinct_types_sorted_without_empty() {
        let store = setup_store().await;
        store.create(&fields("a", "terminology")).await.unwrap();
        store.create(&fields("b", "spelling")).await.unwrap();
        store.create(&fields("c", "spelling")).await.unwrap();
        store.create(&fields("d", "")).await.unwrap();
        store
            .create(&NewComment {
                comment_type: None,
                ..fields("e", "")
            })
            .await
            .unwrap();

        assert_eq!(
            store.distinct_types().await.unwrap(),
            vec!["spelling".to_string(), "terminology".to_string()]
        );
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_rows() {
        let store = setup_store().await;
        let old = store.create(&fields("old", "spelling")).await.unwrap();

        let rows = vec![fields("n1", "structure"), NewComment::default()];
        let inserted = store.replace_all(&rows).await.unwrap();

        assert_eq!(inserted, 2);
        assert_eq!(store.count().await.unwrap(), 2);
        assert_eq!(store.get(old.id).await.unwrap(), None);

        // Ids continue past the discarded ones
        let listed = store.list().await.unwrap();
        assert!(listed.iter().all(|c| c.id > old.id));
        assert_eq!(listed[1].comment, None);
    }

    #[tokio::test]
    async fn test_replace_all_with_nothing_empties_store() {
        let store = setup_store().await;
        store.create(&fields("old", "spelling")).await.unwrap();

        assert_eq!(store.replace_all(&[]).await.unwrap(), 0);
        assert!(store.list().await.unwrap().is_empty());
    }
}
