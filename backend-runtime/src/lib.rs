//! # Backend Runtime
//!
//! Configuration, logging and client selection for the backend core.
//!
//! ## Overview
//!
//! A process decides once, at startup, whether it talks to the hosted
//! backend or to the development mock over the local file store:
//!
//! ```ignore
//! use backend_runtime::{connect, BackendConfig, LoggingConfig, init_logging};
//!
//! init_logging(LoggingConfig::default())?;
//! let client = connect(BackendConfig::from_env()?).await?;
//!
//! // From here on, application code is backend-agnostic.
//! let user = client.auth().get_user().await?;
//! ```
//!
//! The module split follows the concerns: [`config`] owns mode selection and
//! validation, [`logging`] owns `tracing` setup, and [`connect`](connect())
//! performs the one-time client construction.

pub mod config;
pub mod connect;
pub mod error;
pub mod logging;

pub use config::{BackendConfig, BackendConfigBuilder, BackendMode};
pub use connect::connect;
pub use error::{Result, RuntimeError};
pub use logging::{init_logging, LogFormat, LoggingConfig};
