//! Database initialization
//!
//! Opens (or creates) the SQLite database and ensures the `comments` table
//! exists. Table creation is idempotent; there are no migrations.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create the comments table if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // WAL lets readers proceed while a reload transaction is writing
    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_comments_table(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// Limited to one connection that is never recycled, so every query sees
/// the same database for the lifetime of the pool.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    create_comments_table(&pool).await?;

    Ok(pool)
}

/// Create the `comments` table
///
/// AUTOINCREMENT keeps ids from being reused after deletes and reloads.
pub async fn create_comments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            comment TEXT,
            comment_type VARCHAR(50),
            severity VARCHAR(20),
            category VARCHAR(50),
            example_fix TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
