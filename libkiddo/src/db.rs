//! SQLite-backed key-value persistence for Kiddolearn
//!
//! Backs the two durable concerns of the content store: the per-category
//! offline cache and the persisted quiz counters. Both are stored as JSON
//! blobs in a single key-value table.

use sqlx::sqlite::SqlitePool;
use std::path::Path;

use crate::error::Result;
use crate::types::{Category, ContentItem, Progress};

/// Storage key for the persisted quiz counters
const PROGRESS_KEY: &str = "quiz_progress";

/// Key prefix for each category's last-known-good item list
const CACHE_PREFIX: &str = "content_cache:";

fn cache_key(category: Category) -> String {
    format!("{}{}", CACHE_PREFIX, category)
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the database at `db_path` and run migrations
    pub async fn new(db_path: &str) -> Result<Self> {
        // Expand path and create parent directories
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(crate::error::DbError::IoError)?;
        }

        // Use forward slashes for SQLite URL (works on both Windows and Unix)
        // Use mode=rwc to allow creating the database file if it doesn't exist
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(crate::error::DbError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(crate::error::DbError::MigrationError)?;

        Ok(Self { pool })
    }

    /// Fetch a raw value by key
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        use sqlx::Row;

        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(crate::error::DbError::SqlxError)?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Insert or overwrite a raw value
    pub async fn put(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(crate::error::DbError::SqlxError)?;

        Ok(())
    }

    /// Last successfully fetched item list for a category, if one was saved
    pub async fn cached_content(&self, category: Category) -> Result<Option<Vec<ContentItem>>> {
        match self.get(&cache_key(category)).await? {
            Some(raw) => {
                let items =
                    serde_json::from_str(&raw).map_err(crate::error::DbError::JsonError)?;
                Ok(Some(items))
            }
            None => Ok(None),
        }
    }

    /// Replace a category's offline cache with `items`
    pub async fn store_cached_content(
        &self,
        category: Category,
        items: &[ContentItem],
    ) -> Result<()> {
        let raw = serde_json::to_string(items).map_err(crate::error::DbError::JsonError)?;
        self.put(&cache_key(category), &raw).await
    }

    /// Load the persisted quiz counters, if any were saved
    pub async fn load_progress(&self) -> Result<Option<Progress>> {
        match self.get(PROGRESS_KEY).await? {
            Some(raw) => {
                let progress =
                    serde_json::from_str(&raw).map_err(crate::error::DbError::JsonError)?;
                Ok(Some(progress))
            }
            None => Ok(None),
        }
    }

    /// Persist the quiz counters
    pub async fn store_progress(&self, progress: &Progress) -> Result<()> {
        let raw = serde_json::to_string(progress).map_err(crate::error::DbError::JsonError)?;
        self.put(PROGRESS_KEY, &raw).await
    }
}
