//! Mock authentication surface.
//!
//! Simulates the hosted provider's session lifecycle for local development:
//! no network calls, no credential validation, and no failure paths. Because
//! nothing here can fail, this surface cannot be used to exercise an
//! application's auth error handling; that is a known limitation of the
//! development backend, not a defect.

use async_trait::async_trait;
use backend_traits::{
    ApiResult, AuthApi, AuthCallback, AuthChange, AuthSession, AuthSubscription, Credentials,
    Session, SubscriberRegistry, User, UserUpdate,
};
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

const DEV_USER_ID: &str = "dev-user-123";
const DEV_USER_EMAIL: &str = "dev@localdev.internal";
const DEV_ACCESS_TOKEN: &str = "mock-token";
const DEV_REFRESH_TOKEN: &str = "mock-refresh-token";
const DEV_TOKEN_LIFETIME_SECS: i64 = 3600;

/// Construction options for [`MockAuth`].
#[derive(Debug, Clone, Copy)]
pub struct MockAuthOptions {
    /// Whether the client starts in the signed-in state.
    pub initially_signed_in: bool,
}

impl Default for MockAuthOptions {
    fn default() -> Self {
        Self {
            initially_signed_in: true,
        }
    }
}

/// Session state owned by one client instance.
///
/// Kept behind an `Arc` so deferred notification tasks can read the state
/// after the registering call has returned. Nothing here is process-global;
/// two clients in the same process have fully independent state.
struct SessionState {
    signed_in: AtomicBool,
    user: User,
    session: Session,
    subscribers: Arc<SubscriberRegistry>,
}

/// Development stand-in for the hosted authentication provider.
///
/// Two states, signed-out and signed-in; the initial state comes from
/// [`MockAuthOptions`] and defaults to signed-in. Sign-in succeeds with any
/// credentials and always yields the same fixed development identity.
pub struct MockAuth {
    state: Arc<SessionState>,
}

impl MockAuth {
    pub fn new(options: MockAuthOptions) -> Self {
        let user = User {
            id: DEV_USER_ID.to_string(),
            email: DEV_USER_EMAIL.to_string(),
            app_metadata: serde_json::json!({}),
            user_metadata: serde_json::json!({}),
            aud: "authenticated".to_string(),
            created_at: Utc::now(),
        };
        let session = Session {
            access_token: DEV_ACCESS_TOKEN.to_string(),
            refresh_token: DEV_REFRESH_TOKEN.to_string(),
            expires_in: DEV_TOKEN_LIFETIME_SECS,
            user: user.clone(),
        };

        Self {
            state: Arc::new(SessionState {
                signed_in: AtomicBool::new(options.initially_signed_in),
                user,
                session,
                subscribers: Arc::new(SubscriberRegistry::new()),
            }),
        }
    }

    fn is_signed_in(&self) -> bool {
        self.state.signed_in.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthApi for MockAuth {
    async fn get_user(&self) -> ApiResult<Option<User>> {
        if self.is_signed_in() {
            Ok(Some(self.state.user.clone()))
        } else {
            Ok(None)
        }
    }

    /// Accepts any credentials; this is a development stub, not a security
    /// boundary.
    async fn sign_in_with_password(&self, _credentials: Credentials) -> ApiResult<AuthSession> {
        self.state.signed_in.store(true, Ordering::SeqCst);
        info!(user = DEV_USER_ID, "mock sign-in");
        self.state
            .subscribers
            .notify(AuthChange::SignedIn, Some(&self.state.session));

        Ok(AuthSession {
            user: self.state.user.clone(),
            session: self.state.session.clone(),
        })
    }

    async fn sign_out(&self) -> ApiResult<()> {
        self.state.signed_in.store(false, Ordering::SeqCst);
        info!("mock sign-out");
        self.state.subscribers.notify(AuthChange::SignedOut, None);
        Ok(())
    }

    /// Must be called from within a Tokio runtime; the initial notification
    /// is delivered on a spawned task.
    fn on_auth_state_change(&self, callback: Box<AuthCallback>) -> AuthSubscription {
        let callback: Arc<AuthCallback> = Arc::from(callback);
        let id = self.state.subscribers.subscribe(Arc::clone(&callback));
        debug!(subscription = id, "registered auth subscriber");

        // The initial notification carries the state as of registration time
        // and lands on a later scheduling tick, never inline. It goes to the
        // captured callback directly, so it fires even if the handle is
        // unsubscribed in between.
        let snapshot = if self.is_signed_in() {
            (AuthChange::SignedIn, Some(self.state.session.clone()))
        } else {
            (AuthChange::SignedOut, None)
        };
        tokio::spawn(async move {
            (*callback)(snapshot.0, snapshot.1);
        });

        AuthSubscription::new(Arc::clone(&self.state.subscribers), id)
    }

    async fn update_user(&self, _update: UserUpdate) -> ApiResult<User> {
        Ok(self.state.user.clone())
    }
}
