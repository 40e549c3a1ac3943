/// Notification REST API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("network error: {reason}")]
    Network { reason: String },

    #[error("response deserialization failed: {reason}")]
    Deserialization { reason: String },

    #[error("all {retries} retries exhausted: {last_error}")]
    RetriesExhausted { retries: u32, last_error: String },
}
