use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("storage backend error: {0}")]
    Storage(String),

    #[error("download is not available from the development backend")]
    DownloadUnsupported,

    #[error("request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("not authenticated")]
    NotAuthenticated,
}

/// Error-as-value result returned by every client operation.
///
/// Calling code branches on the error the same way against the mock and the
/// production client; no operation panics across the API boundary.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
