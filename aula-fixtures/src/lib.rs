//! Test doubles and builders shared by the workspace's integration tests.

use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use aula_core::errors::{AulaError, AulaResult, StorageError};
use aula_core::models::{
    DesktopAlert, NavigationPattern, Notification, NotificationPriority, NotificationType,
};
use aula_core::traits::{IDesktopNotifier, IDurableStore, IPrefetcher, PreloadPriority};

/// A fixed instant used as "now" across fixtures.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

// ── Storage ───────────────────────────────────────────────────────────────

/// A store whose every operation fails, like a browser with storage disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingStore;

impl IDurableStore for FailingStore {
    fn read(&self, key: &str) -> AulaResult<Option<String>> {
        Err(unavailable(key))
    }

    fn write(&self, key: &str, value: &str) -> AulaResult<()> {
        Err(StorageError::QuotaExceeded {
            key: key.to_string(),
            bytes: value.len(),
        }
        .into())
    }

    fn remove(&self, key: &str) -> AulaResult<()> {
        Err(unavailable(key))
    }
}

fn unavailable(key: &str) -> AulaError {
    StorageError::Unavailable {
        reason: format!("storage disabled (key {key})"),
    }
    .into()
}

// ── Prefetch ──────────────────────────────────────────────────────────────

/// Records every prefetch call; optionally fails for selected routes.
#[derive(Debug, Default)]
pub struct RecordingPrefetcher {
    calls: Mutex<Vec<(String, PreloadPriority)>>,
    failing_routes: Vec<String>,
}

impl RecordingPrefetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(routes: &[&str]) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing_routes: routes.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn calls(&self) -> Vec<(String, PreloadPriority)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.calls().into_iter().map(|(r, _)| r).collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }
}

impl IPrefetcher for RecordingPrefetcher {
    fn prefetch(&self, route: &str, priority: PreloadPriority) -> AulaResult<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((route.to_string(), priority));
        }
        if self.failing_routes.iter().any(|r| r == route) {
            return Err(AulaError::PrefetchFailed {
                route: route.to_string(),
                reason: "simulated network failure".to_string(),
            });
        }
        Ok(())
    }
}

// ── Desktop alerts ────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<DesktopAlert>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<DesktopAlert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl IDesktopNotifier for RecordingNotifier {
    fn notify(&self, alert: &DesktopAlert) -> AulaResult<()> {
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert.clone());
        }
        Ok(())
    }
}

// ── Builders ──────────────────────────────────────────────────────────────

/// Build a notification with sensible defaults.
pub fn make_notification(id: &str, title: &str, category: Option<&str>) -> Notification {
    Notification {
        id: id.to_string(),
        title: title.to_string(),
        message: format!("Detalle de {title}"),
        notification_type: NotificationType::Info,
        category: category.map(str::to_string),
        priority: NotificationPriority::Medium,
        read: false,
        read_at: None,
        action_url: None,
        expires_at: None,
        created_at: epoch(),
        group_key: None,
        group_count: None,
    }
}

/// A notification with a random ID created `minutes_ago` before [`epoch`].
pub fn notification_at(title: &str, category: Option<&str>, minutes_ago: i64) -> Notification {
    let mut n = make_notification(&uuid::Uuid::new_v4().to_string(), title, category);
    n.created_at = epoch() - Duration::minutes(minutes_ago);
    n
}

/// A high-priority notification (qualifies for a desktop alert).
pub fn urgent_notification(id: &str, title: &str) -> Notification {
    let mut n = make_notification(id, title, Some("announcement"));
    n.priority = NotificationPriority::High;
    n.notification_type = NotificationType::Warning;
    n
}

/// SSE `data:` payload for a pushed notification.
pub fn notification_event_json(n: &Notification) -> String {
    serde_json::json!({ "type": "notification", "notification": n }).to_string()
}

pub fn pattern(from: &str, to: &str, frequency: u32, last_access: DateTime<Utc>) -> NavigationPattern {
    NavigationPattern {
        from: from.to_string(),
        to: to.to_string(),
        frequency,
        last_access,
        avg_time_ms: 5_000,
    }
}
