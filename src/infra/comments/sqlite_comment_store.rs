// SQLite-backed comment store.
//
// Tables:
// - announcement_comments: one row per accepted comment, keyed by a generated id
//
// Rows are only ever inserted. Each append is a single INSERT.

use super::comment_ids::generate_comment_id;
use crate::core::comments::{CommentRecord, CommentStore, StoreError, StoredComment};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

pub struct SqliteCommentStore {
    pool: Pool<Sqlite>,
}

impl SqliteCommentStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure the file exists if it's a file path
        let path_str = database_url.trim_start_matches("sqlite://");
        if !database_url.contains(":memory:") && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_url.starts_with("sqlite:") {
            database_url.to_string()
        } else {
            format!("sqlite://{}", database_url)
        };

        let pool = SqlitePoolOptions::new().connect(&conn_str).await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    /// Run database migrations to create required tables.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS announcement_comments (
                id TEXT PRIMARY KEY,
                announcement_id TEXT NOT NULL,
                content TEXT NOT NULL,
                is_anonymous BOOLEAN NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_announcement_comments_thread
                ON announcement_comments(announcement_id, created_at);
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(())
    }

    /// Number of comments stored for an announcement.
    #[allow(dead_code)]
    pub async fn count_for_announcement(&self, announcement_id: &str) -> Result<u64, StoreError> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS total FROM announcement_comments WHERE announcement_id = ?",
        )
        .bind(announcement_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(row.get::<i64, _>("total") as u64)
    }
}

#[async_trait]
impl CommentStore for SqliteCommentStore {
    async fn append(
        &self,
        announcement_id: &str,
        record: CommentRecord,
    ) -> Result<StoredComment, StoreError> {
        let id = generate_comment_id();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO announcement_comments (id, announcement_id, content, is_anonymous, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(announcement_id)
        .bind(&record.content)
        .bind(record.is_anonymous)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::StorageError(e.to_string()))?;

        Ok(StoredComment { id, created_at })
    }
}
