//! # Backend Client Traits
//!
//! The portability contract between application code and a backend client.
//!
//! ## Overview
//!
//! This crate defines the surface a backend client must expose:
//!
//! - [`AuthApi`](auth::AuthApi) - session lifecycle and state-change
//!   subscriptions
//! - [`StorageApi`](storage::StorageApi) - object upload, removal, download
//!   and public URL resolution
//! - [`BackendClient`](client::BackendClient) - the pair of surfaces a client
//!   hands to the application
//!
//! Two implementations exist: `backend-mock` redirects everything to a local
//! persistent store for development, and `backend-remote` speaks to the
//! hosted service over HTTP. Application code holds an `Arc<dyn
//! BackendClient>` and never learns which one it got.
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiResult`](error::ApiResult); errors travel as
//! values so calling code branches identically against either backend.
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync` and are designed to be shared across
//! async tasks behind `Arc`.

pub mod auth;
pub mod client;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{ApiError, ApiResult};

// Re-export commonly used types
pub use auth::{AuthApi, AuthCallback, AuthChange, AuthSubscription, SubscriberRegistry};
pub use client::BackendClient;
pub use storage::StorageApi;
pub use types::{AuthSession, Credentials, Session, UploadedObject, User, UserUpdate};
