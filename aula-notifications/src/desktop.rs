//! Desktop alerts for urgent notifications.
//!
//! Alerts are suppressed while the page has focus and globally throttled
//! to one per throttle window.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use aula_core::config::NotificationConfig;
use aula_core::models::{DesktopAlert, Notification};
use aula_core::{IClock, IDesktopNotifier};
use aula_observability::events;

/// Shared page-focus flag, set by the UI shell.
#[derive(Debug, Clone, Default)]
pub struct PageFocus(Arc<AtomicBool>);

impl PageFocus {
    pub fn new(focused: bool) -> Self {
        Self(Arc::new(AtomicBool::new(focused)))
    }

    pub fn set_focused(&self, focused: bool) {
        self.0.store(focused, Ordering::Relaxed);
    }

    pub fn is_focused(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

pub struct DesktopAlertPolicy {
    notifier: Arc<dyn IDesktopNotifier>,
    clock: Arc<dyn IClock>,
    throttle: Duration,
    last_sent: Option<DateTime<Utc>>,
}

impl DesktopAlertPolicy {
    pub fn new(
        config: &NotificationConfig,
        notifier: Arc<dyn IDesktopNotifier>,
        clock: Arc<dyn IClock>,
    ) -> Self {
        Self {
            notifier,
            clock,
            throttle: Duration::from_std(config.desktop_throttle()).unwrap_or(Duration::MAX),
            last_sent: None,
        }
    }

    /// Show an alert for `notification` if it qualifies, the page is not
    /// focused, and the throttle window has passed. Returns whether an
    /// alert was shown.
    pub fn offer(&mut self, notification: &Notification, page_focused: bool) -> bool {
        if !notification.wants_desktop_alert() || page_focused {
            return false;
        }
        let now = self.clock.now();
        if let Some(last) = self.last_sent {
            if now - last < self.throttle {
                tracing::debug!(id = %notification.id, "desktop alert throttled");
                return false;
            }
        }

        match self.notifier.notify(&DesktopAlert::from(notification)) {
            Ok(()) => {
                self.last_sent = Some(now);
                events::desktop_alert_sent(&notification.id);
                true
            }
            Err(e) => {
                tracing::warn!(id = %notification.id, error = %e, "desktop alert failed");
                false
            }
        }
    }

    pub fn last_sent(&self) -> Option<DateTime<Utc>> {
        self.last_sent
    }
}
