//! # Remote Backend Client
//!
//! The production implementation of the backend client contract, speaking to
//! the hosted service's auth and storage REST endpoints over HTTPS.
//!
//! Sessions live in memory for the lifetime of the client; sign-in and
//! sign-out notify the same subscriber registry the development client uses,
//! so application code observes identical state-change behavior against
//! either backend.
//!
//! Retry policies and token refresh are intentionally out of scope here;
//! callers see transport and API failures as values and decide what to do
//! with them.

pub mod client;
mod types;

pub use client::{RemoteBackendClient, RemoteConfig};
