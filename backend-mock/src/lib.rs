//! # Development Backend Client
//!
//! A development-mode substitute for the hosted backend client. Auth calls
//! mutate in-memory mock session state and fan notifications out to
//! subscribers; storage calls pass through to the persistent
//! [`FileStore`](local_store::FileStore), so uploaded files survive
//! restarts without any network service.
//!
//! The client implements the same [`BackendClient`](backend_traits::BackendClient)
//! contract as the production client. The deliberate differences:
//!
//! - sign-in succeeds with any credentials and always yields the same fixed
//!   development identity
//! - downloads always fail, forcing callers onto their local-fallback path
//! - public URL resolution returns the path unchanged
//!
//! No auth operation can fail here, which keeps development stable but means
//! auth error paths cannot be exercised against this client.

pub mod auth;
pub mod client;
pub mod storage;

pub use auth::{MockAuth, MockAuthOptions};
pub use client::MockBackendClient;
pub use storage::MockStorage;
