//! libSQL-backed key-value store

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::KeyValueStore;
use crate::db::Database;
use crate::error::Result;
use crate::util::unix_timestamp_millis_now;

/// Database file name inside the data directory
pub const DATABASE_FILE_NAME: &str = "betaware.db";

/// Thread-safe key-value store over the local mirror database.
#[derive(Clone)]
pub struct LibSqlKeyValueStore {
    db: Arc<Mutex<Database>>,
}

impl LibSqlKeyValueStore {
    /// Open (or create) the store at the given database path.
    pub async fn open_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path).await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }

    /// Open the store inside a data directory using the default file name.
    pub async fn open_in_dir(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::open_path(data_dir.into().join(DATABASE_FILE_NAME)).await
    }

    /// Open an in-memory store (primarily for tests).
    pub async fn open_in_memory() -> Result<Self> {
        let db = Database::open_in_memory().await?;
        Ok(Self {
            db: Arc::new(Mutex::new(db)),
        })
    }
}

#[async_trait]
impl KeyValueStore for LibSqlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let db = self.db.lock().await;
        let mut rows = db
            .connection()
            .query(
                "SELECT value FROM kv_store WHERE key = ?",
                libsql::params![key.to_string()],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, ?)
                 ON CONFLICT(key) DO UPDATE SET
                     value = excluded.value,
                     updated_at = excluded.updated_at",
                libsql::params![
                    key.to_string(),
                    value.to_string(),
                    unix_timestamp_millis_now()
                ],
            )
            .await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let db = self.db.lock().await;
        db.connection()
            .execute(
                "DELETE FROM kv_store WHERE key = ?",
                libsql::params![key.to_string()],
            )
            .await?;
        Ok(())
    }
}
