//! Blob persistence over a single SQLite table.

use crate::error::{Result, StoreError};
use bytes::Bytes;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{debug, warn};

/// Persistent key-value store for binary blobs, keyed by string path.
///
/// One logical table maps path to blob; writing a path overwrites any prior
/// value. Paths are opaque to the store: no validation, no normalization.
/// Data survives process restarts but not deletion of the database file.
///
/// SQLite serializes writes against the table internally; the store adds no
/// locking of its own, so concurrent writes to the same path resolve to
/// last-writer-wins by commit order.
///
/// # Example
///
/// ```ignore
/// use local_store::FileStore;
///
/// let store = FileStore::open("dev-files.db").await?;
/// store.save("avatars/a.png", &bytes).await?;
/// let blob = store.get("avatars/a.png").await?;
/// store.remove("avatars/a.png").await?;
/// ```
pub struct FileStore {
    pool: SqlitePool,
}

impl FileStore {
    /// Open or create the store at the given database path.
    ///
    /// Parent directories are created as needed. The schema is a single
    /// fixed version; the only upgrade step is creating the table on first
    /// use, and it is idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the database cannot be opened
    /// or the table cannot be created.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    StoreError::Unavailable(format!("failed to create store directory: {}", e))
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .pragma("user_version", "1");

        let store = Self::connect(options, 5).await?;
        debug!(path = %path.display(), "opened file store");
        Ok(store)
    }

    /// Open an in-memory store (for testing).
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .pragma("user_version", "1");

        // A single connection keeps every operation on the same in-memory
        // database.
        Self::connect(options, 1).await
    }

    async fn connect(options: SqliteConnectOptions, max_connections: u32) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| {
                warn!(error = %e, "failed to open blob database");
                StoreError::Unavailable(e.to_string())
            })?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS files (
                path       TEXT PRIMARY KEY,
                data       BLOB NOT NULL,
                updated_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "failed to create files table");
            StoreError::Unavailable(e.to_string())
        })?;

        Ok(Self { pool })
    }

    fn now() -> i64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Store `blob` under `path`, overwriting any existing value.
    ///
    /// Returns the path on success, [`StoreError::Write`] if the write is
    /// rejected by the database.
    pub async fn save(&self, path: &str, blob: &[u8]) -> Result<String> {
        sqlx::query(
            r#"
            INSERT INTO files (path, data, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(path) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(path)
        .bind(blob)
        .bind(Self::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(path = path, error = %e, "blob write rejected");
            StoreError::Write(e.to_string())
        })?;

        debug!(path = path, size = blob.len(), "stored blob");
        Ok(path.to_string())
    }

    /// Fetch the blob stored under `path`.
    ///
    /// Returns `None` if the path was never written or has been removed
    /// since; an empty blob is a stored value, not an absence.
    pub async fn get(&self, path: &str) -> Result<Option<Bytes>> {
        let row = sqlx::query("SELECT data FROM files WHERE path = ?")
            .bind(path)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(path = path, error = %e, "blob read failed");
                StoreError::Read(e.to_string())
            })?;

        Ok(row.map(|row| {
            let data: Vec<u8> = row.get(0);
            Bytes::from(data)
        }))
    }

    /// Delete the blob at `path`.
    ///
    /// Removing a path that was never written is not an error.
    pub async fn remove(&self, path: &str) -> Result<()> {
        sqlx::query("DELETE FROM files WHERE path = ?")
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(path = path, error = %e, "blob delete failed");
                StoreError::Write(e.to_string())
            })?;

        debug!(path = path, "removed blob");
        Ok(())
    }
}

impl std::fmt::Debug for FileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let store = FileStore::in_memory().await.unwrap();

        store.save("a/b.png", b"0123456789").await.unwrap();
        let blob = store.get("a/b.png").await.unwrap().unwrap();
        assert_eq!(&blob[..], b"0123456789");
    }

    #[tokio::test]
    async fn get_before_any_save_is_absent_not_error() {
        let store = FileStore::in_memory().await.unwrap();
        assert!(store.get("never/written").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_prior_value() {
        let store = FileStore::in_memory().await.unwrap();

        store.save("doc", b"first").await.unwrap();
        store.save("doc", b"second").await.unwrap();

        let blob = store.get("doc").await.unwrap().unwrap();
        assert_eq!(&blob[..], b"second");
    }

    #[tokio::test]
    async fn remove_of_missing_path_succeeds() {
        let store = FileStore::in_memory().await.unwrap();
        store.remove("never/written").await.unwrap();
    }

    #[tokio::test]
    async fn remove_makes_subsequent_get_absent() {
        let store = FileStore::in_memory().await.unwrap();

        store.save("doc", b"payload").await.unwrap();
        store.remove("doc").await.unwrap();

        assert!(store.get("doc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_blob_is_distinct_from_absent() {
        let store = FileStore::in_memory().await.unwrap();

        store.save("empty", b"").await.unwrap();
        let blob = store.get("empty").await.unwrap();
        assert_eq!(blob, Some(Bytes::new()));
    }

    #[tokio::test]
    async fn binary_payloads_are_preserved_exactly() {
        let store = FileStore::in_memory().await.unwrap();
        let payload: Vec<u8> = (0..=255).collect();

        store.save("bin", &payload).await.unwrap();
        let blob = store.get("bin").await.unwrap().unwrap();
        assert_eq!(&blob[..], &payload[..]);
    }

    #[tokio::test]
    async fn save_returns_the_path() {
        let store = FileStore::in_memory().await.unwrap();
        let path = store.save("some/nested/key", b"x").await.unwrap();
        assert_eq!(path, "some/nested/key");
    }

    #[tokio::test]
    async fn paths_are_opaque_and_independent() {
        let store = FileStore::in_memory().await.unwrap();

        store.save("a/b", b"one").await.unwrap();
        store.save("a/b/", b"two").await.unwrap();

        assert_eq!(&store.get("a/b").await.unwrap().unwrap()[..], b"one");
        assert_eq!(&store.get("a/b/").await.unwrap().unwrap()[..], b"two");
    }

    #[tokio::test]
    async fn data_survives_reopening_the_database() {
        let dir = std::env::temp_dir().join(format!("local-store-test-{}", Uuid::new_v4()));
        let db_path = dir.join("files.db");

        {
            let store = FileStore::open(&db_path).await.unwrap();
            store.save("persisted", b"still here").await.unwrap();
        }

        let store = FileStore::open(&db_path).await.unwrap();
        let blob = store.get("persisted").await.unwrap().unwrap();
        assert_eq!(&blob[..], b"still here");

        drop(store);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
