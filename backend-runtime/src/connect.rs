//! Process-start backend selection.

use crate::config::{BackendConfig, BackendMode};
use crate::error::Result;
use backend_mock::MockBackendClient;
use backend_remote::{RemoteBackendClient, RemoteConfig};
use backend_traits::BackendClient;
use local_store::FileStore;
use std::sync::Arc;
use tracing::info;

/// Build the backend client selected by the configuration.
///
/// The mode switch happens exactly once, here; it is not re-evaluated at
/// runtime. Development mode opens the local file store and wraps it in the
/// mock client, production mode constructs the HTTP client for the hosted
/// service. Application code receives the same `Arc<dyn BackendClient>`
/// either way.
pub async fn connect(config: BackendConfig) -> Result<Arc<dyn BackendClient>> {
    config.validate()?;

    match config.mode {
        BackendMode::Development => {
            info!(
                store_path = %config.store_path.display(),
                "development mode: mock backend over the local file store"
            );
            let store = FileStore::open(&config.store_path).await?;
            Ok(Arc::new(MockBackendClient::new(Arc::new(store))))
        }
        BackendMode::Production => {
            // validate() guarantees the URL and key are present here.
            let base_url = config.base_url.clone().unwrap_or_default();
            let anon_key = config.anon_key.clone().unwrap_or_default();
            info!(base_url = %base_url, "production mode: remote backend");
            Ok(Arc::new(RemoteBackendClient::new(RemoteConfig {
                base_url,
                anon_key,
                bucket: config.bucket,
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backend_traits::Credentials;
    use bytes::Bytes;
    use uuid::Uuid;

    #[tokio::test]
    async fn development_mode_yields_a_working_client() {
        let dir = std::env::temp_dir().join(format!("backend-runtime-test-{}", Uuid::new_v4()));
        let config = BackendConfig::builder()
            .store_path(dir.join("files.db"))
            .build()
            .unwrap();

        let client = connect(config).await.unwrap();

        // Storage round-trips through the local store.
        let uploaded = client
            .storage()
            .upload("hello.txt", Bytes::from_static(b"hi"))
            .await
            .unwrap();
        assert_eq!(uploaded.path, "hello.txt");

        // Auth behaves like the development stub.
        client
            .auth()
            .sign_in_with_password(Credentials::new("x", "y"))
            .await
            .unwrap();
        assert!(client.auth().get_user().await.unwrap().is_some());

        // Downloads are refused in development mode.
        assert!(client.storage().download("hello.txt").await.is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn production_mode_yields_the_remote_client() {
        let config = BackendConfig::builder()
            .mode(BackendMode::Production)
            .base_url("https://project.example.co")
            .anon_key("anon-key")
            .build()
            .unwrap();

        let client = connect(config).await.unwrap();

        // The remote client resolves public URLs against the service,
        // unlike the mock, which echoes the path.
        let url = client.storage().get_public_url("a/b.png");
        assert!(url.starts_with("https://project.example.co/"));
    }

    #[tokio::test]
    async fn invalid_configuration_is_rejected() {
        let config = BackendConfig {
            mode: BackendMode::Production,
            store_path: "unused".into(),
            base_url: None,
            anon_key: None,
            bucket: "files".to_string(),
        };

        assert!(connect(config).await.is_err());
    }
}
