//! # Backend Configuration
//!
//! Selects and parameterizes the backend client used by the application.
//!
//! ## Overview
//!
//! The mode is a boolean development/production switch decided once at
//! process start, usually from the environment, and never re-evaluated at
//! runtime. Development mode needs only a path for the local file store;
//! production mode needs the hosted service's URL and anonymous key. The
//! builder validates fail-fast with actionable messages so a misconfigured
//! process dies at startup instead of at the first request.
//!
//! ## Usage
//!
//! ```ignore
//! use backend_runtime::config::BackendConfig;
//!
//! // From the environment (BACKEND_MODE, BACKEND_URL, ...)
//! let config = BackendConfig::from_env()?;
//!
//! // Or explicitly
//! let config = BackendConfig::builder()
//!     .mode(BackendMode::Development)
//!     .store_path("dev-files.db")
//!     .build()?;
//! ```

use crate::error::{Result, RuntimeError};
use std::fmt;
use std::path::PathBuf;

/// Default location of the development file store database.
const DEFAULT_STORE_PATH: &str = "dev-files.db";

/// Default storage bucket name in production mode.
const DEFAULT_BUCKET: &str = "files";

/// Which backend client the process uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendMode {
    /// Mock client over the local file store; no network service required.
    #[default]
    Development,
    /// HTTP client against the hosted service.
    Production,
}

impl BackendMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendMode::Development => "development",
            BackendMode::Production => "production",
        }
    }

    /// Parse a mode from a configuration string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(BackendMode::Development),
            "production" | "prod" => Some(BackendMode::Production),
            _ => None,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, BackendMode::Development)
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved backend configuration.
///
/// Construct through [`BackendConfig::builder`] or
/// [`BackendConfig::from_env`]; both run [`validate`](Self::validate).
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Selected backend mode
    pub mode: BackendMode,
    /// Path of the local file store database (development mode)
    pub store_path: PathBuf,
    /// Hosted service base URL (production mode)
    pub base_url: Option<String>,
    /// Hosted service anonymous key (production mode)
    pub anon_key: Option<String>,
    /// Storage bucket name (production mode)
    pub bucket: String,
}

impl BackendConfig {
    pub fn builder() -> BackendConfigBuilder {
        BackendConfigBuilder::default()
    }

    /// Build the configuration from environment variables.
    ///
    /// | Variable             | Meaning                                |
    /// |----------------------|----------------------------------------|
    /// | `BACKEND_MODE`       | `development` (default) or `production`|
    /// | `BACKEND_STORE_PATH` | development file store database path   |
    /// | `BACKEND_URL`        | hosted service base URL                |
    /// | `BACKEND_ANON_KEY`   | hosted service anonymous key           |
    /// | `BACKEND_BUCKET`     | storage bucket name                    |
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(raw) = std::env::var("BACKEND_MODE") {
            let mode = BackendMode::parse(&raw).ok_or_else(|| {
                RuntimeError::Config(format!(
                    "unrecognized BACKEND_MODE value: {raw:?} (expected \"development\" or \"production\")"
                ))
            })?;
            builder = builder.mode(mode);
        }
        if let Ok(path) = std::env::var("BACKEND_STORE_PATH") {
            builder = builder.store_path(path);
        }
        if let Ok(url) = std::env::var("BACKEND_URL") {
            builder = builder.base_url(url);
        }
        if let Ok(key) = std::env::var("BACKEND_ANON_KEY") {
            builder = builder.anon_key(key);
        }
        if let Ok(bucket) = std::env::var("BACKEND_BUCKET") {
            builder = builder.bucket(bucket);
        }

        builder.build()
    }

    /// Check the configuration against its selected mode.
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            BackendMode::Development => {
                if self.store_path.as_os_str().is_empty() {
                    return Err(RuntimeError::Config(
                        "development mode requires a file store path. \
                         Use .store_path() or set BACKEND_STORE_PATH."
                            .to_string(),
                    ));
                }
            }
            BackendMode::Production => {
                if self.base_url.as_deref().unwrap_or("").is_empty() {
                    return Err(RuntimeError::Config(
                        "production mode requires the hosted service URL. \
                         Use .base_url() or set BACKEND_URL."
                            .to_string(),
                    ));
                }
                if self.anon_key.as_deref().unwrap_or("").is_empty() {
                    return Err(RuntimeError::Config(
                        "production mode requires the anonymous API key. \
                         Use .anon_key() or set BACKEND_ANON_KEY."
                            .to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Builder for [`BackendConfig`].
#[derive(Debug, Default)]
pub struct BackendConfigBuilder {
    mode: Option<BackendMode>,
    store_path: Option<PathBuf>,
    base_url: Option<String>,
    anon_key: Option<String>,
    bucket: Option<String>,
}

impl BackendConfigBuilder {
    /// Select the backend mode. Defaults to development.
    pub fn mode(mut self, mode: BackendMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the development file store database path.
    pub fn store_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Set the hosted service base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the hosted service anonymous key.
    pub fn anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Set the storage bucket name. Defaults to `files`.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<BackendConfig> {
        let config = BackendConfig {
            mode: self.mode.unwrap_or_default(),
            store_path: self
                .store_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH)),
            base_url: self.base_url,
            anon_key: self.anon_key,
            bucket: self.bucket.unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
