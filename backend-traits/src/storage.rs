//! Object storage surface.

use crate::error::ApiResult;
use crate::types::UploadedObject;
use async_trait::async_trait;
use bytes::Bytes;

/// Object storage operations exposed by a backend client.
///
/// Signatures and result shapes match the hosted provider's client surface
/// so calling code is portable between the development and production
/// backends without modification.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Store `blob` under `path`, overwriting any existing object.
    async fn upload(&self, path: &str, blob: Bytes) -> ApiResult<UploadedObject>;

    /// Remove the objects at `paths`, one at a time.
    ///
    /// Removal stops at the first failure, so earlier paths may already be
    /// gone when an error is returned.
    async fn remove(&self, paths: &[String]) -> ApiResult<()>;

    /// Fetch the object stored under `path`.
    ///
    /// The development backend always fails this operation; callers are
    /// expected to fall back to their local cache.
    async fn download(&self, path: &str) -> ApiResult<Bytes>;

    /// Resolve `path` to a publicly reachable URL.
    ///
    /// The development backend returns the path unchanged and leaves
    /// resolution to the caller.
    fn get_public_url(&self, path: &str) -> String;
}
