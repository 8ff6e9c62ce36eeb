//! Mock storage surface delegating to the local file store.

use async_trait::async_trait;
use backend_traits::{ApiError, ApiResult, StorageApi, UploadedObject};
use bytes::Bytes;
use local_store::FileStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Development stand-in for the hosted object storage provider.
///
/// Uploads and removals are real: they land in the [`FileStore`] and survive
/// restarts. Downloads always fail so the consuming application exercises
/// its local-fallback path instead of depending on a backend fetch that does
/// not exist in development.
pub struct MockStorage {
    store: Arc<FileStore>,
}

impl MockStorage {
    pub fn new(store: Arc<FileStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StorageApi for MockStorage {
    async fn upload(&self, path: &str, blob: Bytes) -> ApiResult<UploadedObject> {
        debug!(path = path, size = blob.len(), "uploading to local store");
        match self.store.save(path, &blob).await {
            Ok(path) => Ok(UploadedObject { path }),
            Err(e) => {
                warn!(path = path, error = %e, "local upload failed");
                Err(ApiError::Storage(e.to_string()))
            }
        }
    }

    async fn remove(&self, paths: &[String]) -> ApiResult<()> {
        debug!(count = paths.len(), "removing from local store");
        // Sequential, stopping at the first failure; earlier paths may
        // already be gone when an error is returned.
        for path in paths {
            self.store
                .remove(path)
                .await
                .map_err(|e| ApiError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Always fails, and never reads the store.
    async fn download(&self, path: &str) -> ApiResult<Bytes> {
        warn!(path = path, "download unavailable from the development backend");
        Err(ApiError::DownloadUnsupported)
    }

    fn get_public_url(&self, path: &str) -> String {
        // Resolution is deferred to the caller in development.
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> (MockStorage, Arc<FileStore>) {
        let store = Arc::new(FileStore::in_memory().await.unwrap());
        (MockStorage::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn upload_persists_to_the_store() {
        let (storage, store) = storage().await;

        let result = storage
            .upload("a/b.png", Bytes::from_static(b"0123456789"))
            .await
            .unwrap();
        assert_eq!(result.path, "a/b.png");

        let blob = store.get("a/b.png").await.unwrap().unwrap();
        assert_eq!(&blob[..], b"0123456789");
    }

    #[tokio::test]
    async fn remove_deletes_each_path() {
        let (storage, store) = storage().await;

        storage
            .upload("one", Bytes::from_static(b"1"))
            .await
            .unwrap();
        storage
            .upload("two", Bytes::from_static(b"2"))
            .await
            .unwrap();

        storage
            .remove(&["one".to_string(), "two".to_string()])
            .await
            .unwrap();

        assert!(store.get("one").await.unwrap().is_none());
        assert!(store.get("two").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn remove_of_missing_paths_is_ok() {
        let (storage, _store) = storage().await;
        storage.remove(&["ghost".to_string()]).await.unwrap();
    }

    #[tokio::test]
    async fn download_always_fails_without_touching_the_store() {
        let (storage, store) = storage().await;

        storage
            .upload("present", Bytes::from_static(b"data"))
            .await
            .unwrap();

        let err = storage.download("present").await.unwrap_err();
        assert_eq!(err, ApiError::DownloadUnsupported);

        // The blob is still there; the failure is a policy, not a read.
        assert!(store.get("present").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn public_url_is_the_path_unchanged() {
        let (storage, _store) = storage().await;
        assert_eq!(storage.get_public_url("a/b.png"), "a/b.png");
    }
}
