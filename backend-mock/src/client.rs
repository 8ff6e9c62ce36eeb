//! The assembled development client.

use crate::auth::{MockAuth, MockAuthOptions};
use crate::storage::MockStorage;
use backend_traits::{AuthApi, BackendClient, StorageApi};
use local_store::FileStore;
use std::sync::Arc;
use tracing::info;

/// Development backend client: mock auth plus storage over the local file
/// store.
///
/// Drop-in replacement for the production client; application code holding a
/// `&dyn BackendClient` cannot tell them apart, except that downloads fail
/// by design.
///
/// # Example
///
/// ```ignore
/// use backend_mock::MockBackendClient;
/// use local_store::FileStore;
/// use std::sync::Arc;
///
/// let store = Arc::new(FileStore::open("dev-files.db").await?);
/// let client = MockBackendClient::new(store);
/// let user = client.auth().get_user().await?;
/// ```
pub struct MockBackendClient {
    auth: MockAuth,
    storage: MockStorage,
}

impl MockBackendClient {
    /// Build a client with the default options (initially signed in).
    pub fn new(store: Arc<FileStore>) -> Self {
        Self::with_options(store, MockAuthOptions::default())
    }

    /// Build a client with explicit auth options.
    pub fn with_options(store: Arc<FileStore>, options: MockAuthOptions) -> Self {
        info!("using development backend client with local file store");
        Self {
            auth: MockAuth::new(options),
            storage: MockStorage::new(store),
        }
    }
}

impl BackendClient for MockBackendClient {
    fn auth(&self) -> &dyn AuthApi {
        &self.auth
    }

    fn storage(&self) -> &dyn StorageApi {
        &self.storage
    }
}
