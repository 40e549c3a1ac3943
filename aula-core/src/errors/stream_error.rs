/// Notification stream errors.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("failed to connect to {url}: {reason}")]
    ConnectFailed { url: String, reason: String },

    #[error("stream closed by server")]
    Closed,

    #[error("transient stream error: {reason}")]
    Transient { reason: String },

    #[error("undecodable stream message: {reason}")]
    Decode { reason: String },

    #[error("gave up after {attempts} reconnect attempts")]
    ReconnectExhausted { attempts: u32 },
}

impl StreamError {
    /// Whether the connection is definitively closed (as opposed to a
    /// transient hiccup the transport recovers from on its own).
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed | Self::ConnectFailed { .. })
    }
}
