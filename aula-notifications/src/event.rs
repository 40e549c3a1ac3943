//! Typed messages carried in the stream's `data:` payloads.

use serde::Deserialize;
use serde_json::Value;

use aula_core::errors::StreamError;
use aula_core::models::Notification;

/// A decoded stream message.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Heartbeat,
    Notification(Box<Notification>),
    DashboardUpdate(Value),
    /// Well-formed JSON with a `type` this client does not handle.
    Unknown(String),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Wire {
    Heartbeat,
    Notification { notification: Box<Notification> },
    DashboardUpdate { data: Value },
}

impl StreamEvent {
    /// Decode one `data:` payload.
    pub fn parse(data: &str) -> Result<Self, StreamError> {
        let value: Value = serde_json::from_str(data).map_err(|e| StreamError::Decode {
            reason: e.to_string(),
        })?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| StreamError::Decode {
                reason: "message has no string `type`".to_string(),
            })?
            .to_string();

        if !matches!(
            kind.as_str(),
            "heartbeat" | "notification" | "dashboard_update"
        ) {
            return Ok(Self::Unknown(kind));
        }

        let wire: Wire = serde_json::from_value(value).map_err(|e| StreamError::Decode {
            reason: format!("{kind}: {e}"),
        })?;
        Ok(match wire {
            Wire::Heartbeat => Self::Heartbeat,
            Wire::Notification { notification } => Self::Notification(notification),
            Wire::DashboardUpdate { data } => Self::DashboardUpdate(data),
        })
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Heartbeat => "heartbeat",
            Self::Notification(_) => "notification",
            Self::DashboardUpdate(_) => "dashboard_update",
            Self::Unknown(kind) => kind,
        }
    }
}
