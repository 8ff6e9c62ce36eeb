//! Authentication surface and the subscriber plumbing behind it.
//!
//! Clients expose session lifecycle operations through [`AuthApi`] and fan
//! state transitions out to registered callbacks. The [`SubscriberRegistry`]
//! is the concrete registry both the development and production clients use:
//! registration is synchronous, removal is by the id carried in the returned
//! [`AuthSubscription`] handle, and delivery timing is left to the owning
//! client.

use crate::error::ApiResult;
use crate::types::{AuthSession, Credentials, Session, User, UserUpdate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Authentication state transition delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthChange {
    SignedIn,
    SignedOut,
}

impl AuthChange {
    /// Wire identifier for this transition.
    ///
    /// ```
    /// use backend_traits::AuthChange;
    ///
    /// assert_eq!(AuthChange::SignedIn.as_str(), "SIGNED_IN");
    /// assert_eq!(AuthChange::SignedOut.as_str(), "SIGNED_OUT");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthChange::SignedIn => "SIGNED_IN",
            AuthChange::SignedOut => "SIGNED_OUT",
        }
    }
}

impl fmt::Display for AuthChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback invoked on every authentication state transition.
///
/// The session argument is `Some` for [`AuthChange::SignedIn`] and `None`
/// for [`AuthChange::SignedOut`].
pub type AuthCallback = dyn Fn(AuthChange, Option<Session>) + Send + Sync;

/// Ordered collection of auth-change subscribers.
///
/// Entries are keyed by a monotonically increasing id, so registering the
/// same callback twice yields two independent entries that are each notified.
pub struct SubscriberRegistry {
    next_id: AtomicU64,
    entries: Mutex<Vec<(u64, Arc<AuthCallback>)>>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append a subscriber and return its registry id.
    pub fn subscribe(&self, callback: Arc<AuthCallback>) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut entries = self.entries.lock().expect("subscriber registry poisoned");
        entries.push((id, callback));
        debug!(subscriber = id, count = entries.len(), "auth subscriber added");
        id
    }

    /// Remove the subscriber with the given id.
    ///
    /// Returns `false` if the id was already removed or never existed.
    pub fn unsubscribe(&self, id: u64) -> bool {
        let mut entries = self.entries.lock().expect("subscriber registry poisoned");
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        before != entries.len()
    }

    /// Invoke every registered subscriber in registration order.
    ///
    /// The registry lock is released before callbacks run, so a callback may
    /// register or unsubscribe without deadlocking.
    pub fn notify(&self, change: AuthChange, session: Option<&Session>) {
        let snapshot: Vec<Arc<AuthCallback>> = {
            let entries = self.entries.lock().expect("subscriber registry poisoned");
            entries.iter().map(|(_, cb)| Arc::clone(cb)).collect()
        };
        for callback in snapshot {
            (*callback)(change, session.cloned());
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("subscriber registry poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle returned by [`AuthApi::on_auth_state_change`].
///
/// Dropping the handle does not remove the subscriber; call
/// [`unsubscribe`](Self::unsubscribe) explicitly to stop receiving
/// notifications.
pub struct AuthSubscription {
    registry: Arc<SubscriberRegistry>,
    id: u64,
}

impl AuthSubscription {
    pub fn new(registry: Arc<SubscriberRegistry>, id: u64) -> Self {
        Self { registry, id }
    }

    /// Registry id of this subscription.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Remove the subscriber from the registry.
    ///
    /// Returns `false` if it was already removed.
    pub fn unsubscribe(self) -> bool {
        self.registry.unsubscribe(self.id)
    }
}

impl fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("id", &self.id)
            .finish()
    }
}

/// Session lifecycle operations exposed by a backend client.
///
/// Application code is written against this trait so it runs unmodified
/// against the development and production backends.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// The current user, or `None` when no session is active.
    ///
    /// An absent user is not an error.
    async fn get_user(&self) -> ApiResult<Option<User>>;

    /// Exchange credentials for a session.
    ///
    /// Subscribers registered via [`on_auth_state_change`](Self::on_auth_state_change)
    /// receive a [`AuthChange::SignedIn`] notification on success.
    async fn sign_in_with_password(&self, credentials: Credentials) -> ApiResult<AuthSession>;

    /// End the current session and notify subscribers with
    /// [`AuthChange::SignedOut`].
    async fn sign_out(&self) -> ApiResult<()>;

    /// Register a callback for authentication state transitions.
    ///
    /// The callback receives one notification reflecting the state current at
    /// registration time, delivered asynchronously on a later scheduling tick
    /// rather than inline, and one notification per subsequent transition
    /// until the returned handle is unsubscribed.
    fn on_auth_state_change(&self, callback: Box<AuthCallback>) -> AuthSubscription;

    /// Apply a partial update to the current user.
    async fn update_user(&self, update: UserUpdate) -> ApiResult<User>;
}
