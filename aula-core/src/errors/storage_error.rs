/// Durable client storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage backend failure: {message}")]
    Backend { message: String },

    #[error("corrupt payload under key {key}: {details}")]
    CorruptPayload { key: String, details: String },

    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("quota exceeded writing {key}: {bytes} bytes")]
    QuotaExceeded { key: String, bytes: usize },
}
