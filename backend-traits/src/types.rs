use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An authenticated user account as reported by the backend.
///
/// The metadata fields carry provider-defined JSON objects and are kept
/// opaque; the core never interprets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier assigned by the backend
    pub id: String,
    /// Primary email address
    pub email: String,
    /// Provider-managed metadata (roles, provider ids)
    #[serde(default)]
    pub app_metadata: serde_json::Value,
    /// Application-managed metadata (display name, preferences)
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    /// Audience claim, `"authenticated"` for signed-in users
    #[serde(default)]
    pub aud: String,
    /// Account creation timestamp (UTC)
    pub created_at: DateTime<Utc>,
}

/// An access/refresh token pair bound to a user.
///
/// Token values are redacted from `Debug` output so sessions can be logged
/// without leaking credentials.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token used for API requests
    pub access_token: String,
    /// Token used to obtain a new access token
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    /// The user this session belongs to
    pub user: User,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("user", &self.user)
            .finish()
    }
}

/// Result of a successful password sign-in: the user plus a fresh session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub session: Session,
}

/// Password-grant credentials.
///
/// The development backend accepts any value; the production backend
/// validates them server-side.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Fields accepted by [`AuthApi::update_user`](crate::auth::AuthApi::update_user).
///
/// Unset fields are left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<serde_json::Value>,
}

/// Payload returned by a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedObject {
    /// The path the object was stored under
    pub path: String,
}
