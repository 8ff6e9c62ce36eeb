//! Production backend client over the hosted service's REST API.

use crate::types::{error_message, TokenResponse};
use async_trait::async_trait;
use backend_traits::{
    ApiError, ApiResult, AuthApi, AuthCallback, AuthChange, AuthSession, AuthSubscription,
    BackendClient, Credentials, Session, StorageApi, SubscriberRegistry, UploadedObject, User,
    UserUpdate,
};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Project base URL, e.g. `https://project.example.co`
    pub base_url: String,
    /// Public anonymous API key
    pub anon_key: String,
    /// Storage bucket objects are read from and written to
    pub bucket: String,
}

/// State shared by the auth and storage surfaces of one client.
struct Shared {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
    subscribers: Arc<SubscriberRegistry>,
}

impl Shared {
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Bearer token for the current request: the session's access token when
    /// signed in, the anonymous key otherwise.
    async fn bearer(&self) -> String {
        match self.session.read().await.as_ref() {
            Some(session) => session.access_token.clone(),
            None => self.anon_key.clone(),
        }
    }

    async fn fail(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ApiError::Api {
            status,
            message: error_message(&body),
        }
    }
}

fn transport(e: reqwest::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

/// Authentication against the hosted service.
pub struct RemoteAuth {
    shared: Arc<Shared>,
}

#[async_trait]
impl AuthApi for RemoteAuth {
    async fn get_user(&self) -> ApiResult<Option<User>> {
        if self.shared.session.read().await.is_none() {
            return Ok(None);
        }

        let response = self
            .shared
            .http
            .get(self.shared.endpoint("auth/v1/user"))
            .header("apikey", &self.shared.anon_key)
            .bearer_auth(self.shared.bearer().await)
            .send()
            .await
            .map_err(transport)?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Shared::fail(response).await);
        }

        let user = response
            .json::<User>()
            .await
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(Some(user))
    }

    async fn sign_in_with_password(&self, credentials: Credentials) -> ApiResult<AuthSession> {
        let response = self
            .shared
            .http
            .post(self.shared.endpoint("auth/v1/token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.shared.anon_key)
            .json(&credentials)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Shared::fail(response).await);
        }

        let token = response
            .json::<TokenResponse>()
            .await
            .map_err(|e| ApiError::Serialization(e.to_string()))?;

        let session = Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            user: token.user.clone(),
        };

        *self.shared.session.write().await = Some(session.clone());
        info!(user = %token.user.id, "signed in");
        self.shared
            .subscribers
            .notify(AuthChange::SignedIn, Some(&session));

        Ok(AuthSession {
            user: token.user,
            session,
        })
    }

    async fn sign_out(&self) -> ApiResult<()> {
        let had_session = self.shared.session.read().await.is_some();
        if had_session {
            // Best-effort server-side revocation; the local session is
            // cleared either way.
            let result = self
                .shared
                .http
                .post(self.shared.endpoint("auth/v1/logout"))
                .header("apikey", &self.shared.anon_key)
                .bearer_auth(self.shared.bearer().await)
                .send()
                .await;
            if let Err(e) = result {
                warn!(error = %e, "logout request failed, clearing session locally");
            }
        }

        *self.shared.session.write().await = None;
        info!("signed out");
        self.shared.subscribers.notify(AuthChange::SignedOut, None);
        Ok(())
    }

    fn on_auth_state_change(&self, callback: Box<AuthCallback>) -> AuthSubscription {
        let callback: Arc<AuthCallback> = Arc::from(callback);
        let id = self.shared.subscribers.subscribe(Arc::clone(&callback));
        debug!(subscription = id, "registered auth subscriber");

        // Initial notification with the current state, delivered on a later
        // scheduling tick.
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            match shared.session.read().await.clone() {
                Some(session) => (*callback)(AuthChange::SignedIn, Some(session)),
                None => (*callback)(AuthChange::SignedOut, None),
            }
        });

        AuthSubscription::new(Arc::clone(&self.shared.subscribers), id)
    }

    async fn update_user(&self, update: UserUpdate) -> ApiResult<User> {
        if self.shared.session.read().await.is_none() {
            return Err(ApiError::NotAuthenticated);
        }

        let response = self
            .shared
            .http
            .put(self.shared.endpoint("auth/v1/user"))
            .header("apikey", &self.shared.anon_key)
            .bearer_auth(self.shared.bearer().await)
            .json(&update)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Shared::fail(response).await);
        }

        response
            .json::<User>()
            .await
            .map_err(|e| ApiError::Serialization(e.to_string()))
    }
}

/// Object storage against the hosted service.
pub struct RemoteStorage {
    shared: Arc<Shared>,
    bucket: String,
}

impl RemoteStorage {
    fn object_endpoint(&self, path: &str) -> String {
        self.shared.endpoint(&format!(
            "storage/v1/object/{}/{}",
            self.bucket,
            path.trim_start_matches('/')
        ))
    }
}

#[async_trait]
impl StorageApi for RemoteStorage {
    async fn upload(&self, path: &str, blob: Bytes) -> ApiResult<UploadedObject> {
        let response = self
            .shared
            .http
            .post(self.object_endpoint(path))
            .header("apikey", &self.shared.anon_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .bearer_auth(self.shared.bearer().await)
            .body(blob)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Shared::fail(response).await);
        }

        debug!(path = path, "uploaded object");
        Ok(UploadedObject {
            path: path.to_string(),
        })
    }

    async fn remove(&self, paths: &[String]) -> ApiResult<()> {
        let response = self
            .shared
            .http
            .delete(
                self.shared
                    .endpoint(&format!("storage/v1/object/{}", self.bucket)),
            )
            .header("apikey", &self.shared.anon_key)
            .bearer_auth(self.shared.bearer().await)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Shared::fail(response).await);
        }

        debug!(count = paths.len(), "removed objects");
        Ok(())
    }

    async fn download(&self, path: &str) -> ApiResult<Bytes> {
        let response = self
            .shared
            .http
            .get(self.object_endpoint(path))
            .header("apikey", &self.shared.anon_key)
            .bearer_auth(self.shared.bearer().await)
            .send()
            .await
            .map_err(transport)?;

        if !response.status().is_success() {
            return Err(Shared::fail(response).await);
        }

        response.bytes().await.map_err(transport)
    }

    fn get_public_url(&self, path: &str) -> String {
        self.shared.endpoint(&format!(
            "storage/v1/object/public/{}/{}",
            self.bucket,
            path.trim_start_matches('/')
        ))
    }
}

/// Production backend client speaking to the hosted service.
///
/// Holds the current session in memory and exposes the same auth and storage
/// surfaces as the development client. No retry or backoff is layered on
/// top; transient failures surface to the caller as
/// [`ApiError::Transport`].
pub struct RemoteBackendClient {
    auth: RemoteAuth,
    storage: RemoteStorage,
}

impl RemoteBackendClient {
    pub fn new(config: RemoteConfig) -> Self {
        let shared = Arc::new(Shared {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key,
            session: RwLock::new(None),
            subscribers: Arc::new(SubscriberRegistry::new()),
        });

        info!(base_url = %shared.base_url, bucket = %config.bucket, "using remote backend client");
        Self {
            auth: RemoteAuth {
                shared: Arc::clone(&shared),
            },
            storage: RemoteStorage {
                shared,
                bucket: config.bucket,
            },
        }
    }
}

impl BackendClient for RemoteBackendClient {
    fn auth(&self) -> &dyn AuthApi {
        &self.auth
    }

    fn storage(&self) -> &dyn StorageApi {
        &self.storage
    }
}
