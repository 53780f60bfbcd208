//! SQLite-backed key-value store for the local invoice collection.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use tokio::runtime::Runtime;

use super::r#trait::{KeyValueStore, StoreError};

/// Durable key-value store in a single SQLite table.
///
/// Exposes a synchronous API: calls are driven on a private current-thread
/// runtime, so this must not be used from inside another async runtime.
#[derive(Debug)]
pub struct SqliteKeyValueStore {
    runtime: Runtime,
    pool: SqlitePool,
    path: PathBuf,
}

impl SqliteKeyValueStore {
    /// Open (or create) the database at `path`, creating parent directories.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory at {:?}", parent))?;
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to create runtime for SqliteKeyValueStore")?;

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);

        let pool = runtime.block_on(async {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options)
                .await
                .with_context(|| format!("failed to open SQLite store at {:?}", path))?;

            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS kv_store (
                    key        TEXT PRIMARY KEY,
                    value      TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                )
                "#,
            )
            .execute(&pool)
            .await
            .context("failed to create kv_store table")?;

            Ok::<_, anyhow::Error>(pool)
        })?;

        tracing::info!(path = %path.display(), "opened invoice store");

        Ok(Self {
            runtime,
            pool,
            path,
        })
    }

    /// Open the store at `{app_data_dir}/billforge/invoices.db`.
    pub fn open_default() -> anyhow::Result<Self> {
        Self::open(default_db_path()?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SqliteKeyValueStore {
    fn drop(&mut self) {
        // Close connections while the runtime that opened them is still alive.
        self.runtime.block_on(self.pool.close());
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.runtime.block_on(async {
            let row = sqlx::query(
                r#"
                SELECT value
                FROM kv_store
                WHERE key = ?1
                "#,
            )
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

            match row {
                Some(row) => {
                    let value: String = row
                        .try_get("value")
                        .map_err(|e| StoreError::Unavailable(e.to_string()))?;
                    Ok(Some(value))
                }
                None => Ok(None),
            }
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let updated_at = Utc::now().to_rfc3339();

        self.runtime.block_on(async {
            sqlx::query(
                r#"
                INSERT INTO kv_store (key, value, updated_at)
                VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(key)
            .bind(value)
            .bind(&updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

            Ok(())
        })
    }
}

/// Resolve the default database path:
/// `{app_data_dir}/billforge/invoices.db`.
pub fn default_db_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("failed to resolve OS app data directory - tried data_dir() and home_dir()/.local/share")?;

    let mut path = base;
    path.push("billforge");
    path.push("invoices.db");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_reopening_the_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("invoices.db");

        {
            let store = SqliteKeyValueStore::open(&path).unwrap();
            assert_eq!(store.get("invoices").unwrap(), None);
            store.set("invoices", r#"{"invoices":[]}"#).unwrap();
            store.set("invoices", r#"{"invoices":[1]}"#).unwrap();
        }

        let reopened = SqliteKeyValueStore::open(&path).unwrap();
        assert_eq!(
            reopened.get("invoices").unwrap().as_deref(),
            Some(r#"{"invoices":[1]}"#)
        );
        assert_eq!(reopened.path(), path.as_path());
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        if let Ok(path) = default_db_path() {
            assert!(path.ends_with("billforge/invoices.db"));
        }
    }
}
