//! Error taxonomy for the Aula client layer.
//!
//! Each subsystem has its own error enum; all of them convert into
//! [`AulaError`] so callers can use `?` across crate boundaries.

mod api_error;
mod storage_error;
mod stream_error;
mod validation_error;

pub use api_error::ApiError;
pub use storage_error::StorageError;
pub use stream_error::StreamError;
pub use validation_error::ValidationError;

/// Root error type for every fallible Aula operation.
#[derive(Debug, thiserror::Error)]
pub enum AulaError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("notification stream error: {0}")]
    Stream(#[from] StreamError),

    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("prefetch of {route} failed: {reason}")]
    PrefetchFailed { route: String, reason: String },

    #[error("desktop notification failed: {reason}")]
    DesktopNotification { reason: String },
}

/// Convenience alias used throughout the workspace.
pub type AulaResult<T> = Result<T, AulaError>;
