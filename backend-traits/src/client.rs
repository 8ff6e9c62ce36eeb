//! Top-level client contract.

use crate::auth::AuthApi;
use crate::storage::StorageApi;

/// A backend client: an authentication surface plus an object storage
/// surface.
///
/// Implementations differ in where the data lives (a local database in
/// development, the hosted service in production); the contract is the same
/// either way.
pub trait BackendClient: Send + Sync {
    /// Authentication operations.
    fn auth(&self) -> &dyn AuthApi;

    /// Object storage operations.
    fn storage(&self) -> &dyn StorageApi;
}
