use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] local_store::StoreError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
