use thiserror::Error;

/// Boxed error returned by fallible class thunks
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the class-dict crate
#[derive(Debug, Error)]
pub enum ClassDictError {
    #[error("Class thunk failed: {0}")]
    ThunkFailure(#[source] BoxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ClassDictError>;
