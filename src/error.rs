use thiserror::Error;

/// Main error type for triage-stats
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No drawing surface {surface:?} on page {page:?}")]
    SurfaceNotFound { page: String, surface: String },
}

pub type Result<T> = std::result::Result<T, Error>;
