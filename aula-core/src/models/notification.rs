use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Notification kind, as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Info,
    Success,
    Warning,
    Error,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::System => "system",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

/// `status` filter of the list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatusFilter {
    #[default]
    All,
    Unread,
    Read,
}

impl NotificationStatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }
}

/// A notification addressed to the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub priority: NotificationPriority,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_count: Option<u32>,
}

impl Notification {
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("general")
    }

    /// High priority and system notifications warrant a desktop alert.
    pub fn wants_desktop_alert(&self) -> bool {
        self.priority == NotificationPriority::High || self.category.as_deref() == Some("system")
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Payload for an out-of-page desktop notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesktopAlert {
    /// Notification ID, used by the OS to collapse duplicates.
    pub tag: String,
    pub title: String,
    pub body: String,
    pub action_url: Option<String>,
}

impl From<&Notification> for DesktopAlert {
    fn from(n: &Notification) -> Self {
        Self {
            tag: n.id.clone(),
            title: n.title.clone(),
            body: n.message.clone(),
            action_url: n.action_url.clone(),
        }
    }
}
