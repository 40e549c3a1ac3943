//! Local notification state shared between the stream task and the UI.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;

use aula_core::models::Notification;

/// Whether a notification's read state is confirmed by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadSync {
    Synced,
    /// Marked read locally; waiting on the server for `batch`.
    Pending { batch: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalNotification {
    pub notification: Notification,
    pub sync: ReadSync,
}

impl LocalNotification {
    fn synced(notification: Notification) -> Self {
        Self {
            notification,
            sync: ReadSync::Synced,
        }
    }
}

/// Which notifications a mark-as-read applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadTarget {
    Ids(Vec<String>),
    All,
}

/// Receipt for an optimistic mark-as-read, used to confirm or roll back.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadBatch {
    pub id: u64,
    pub target: ReadTarget,
    previous: Vec<(String, bool, Option<DateTime<Utc>>)>,
}

impl ReadBatch {
    /// IDs whose state actually changed.
    pub fn ids(&self) -> Vec<&str> {
        self.previous.iter().map(|(id, _, _)| id.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }
}

/// Newest-first notification list plus stream side channels.
#[derive(Debug, Default)]
pub struct NotificationState {
    items: Vec<LocalNotification>,
    unread_count: usize,
    dashboard: Option<Value>,
    error: Option<String>,
    next_batch: u64,
}

impl NotificationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pushed notification goes to the front of the list.
    pub fn prepend(&mut self, notification: Notification) {
        if !notification.read {
            self.unread_count += 1;
        }
        self.items.insert(0, LocalNotification::synced(notification));
    }

    /// Replace the list wholesale (after a refetch) and recount unread.
    pub fn replace_all(&mut self, notifications: Vec<Notification>) {
        self.items = notifications
            .into_iter()
            .map(LocalNotification::synced)
            .collect();
        self.recount();
    }

    pub fn items(&self) -> &[LocalNotification] {
        &self.items
    }

    /// Plain notifications, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.items.iter().map(|l| l.notification.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&LocalNotification> {
        self.items.iter().find(|l| l.notification.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.unread_count
    }

    pub fn dashboard(&self) -> Option<&Value> {
        self.dashboard.as_ref()
    }

    pub fn set_dashboard(&mut self, data: Value) {
        self.dashboard = Some(data);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Phase one of mark-as-read: flip matching unread notifications to
    /// read locally and tag them pending.
    pub fn begin_mark_read(&mut self, target: ReadTarget, now: DateTime<Utc>) -> ReadBatch {
        self.next_batch += 1;
        let batch = self.next_batch;
        let wanted: Option<HashSet<&str>> = match &target {
            ReadTarget::Ids(ids) => Some(ids.iter().map(String::as_str).collect()),
            ReadTarget::All => None,
        };

        let mut previous = Vec::new();
        for local in &mut self.items {
            let n = &mut local.notification;
            let selected = wanted.as_ref().map_or(true, |w| w.contains(n.id.as_str()));
            if !selected || n.read {
                continue;
            }
            previous.push((n.id.clone(), n.read, n.read_at));
            n.read = true;
            n.read_at = Some(now);
            local.sync = ReadSync::Pending { batch };
        }
        self.recount();

        ReadBatch {
            id: batch,
            target,
            previous,
        }
    }

    /// Phase two, success: the server accepted the batch.
    pub fn confirm_read(&mut self, batch: &ReadBatch) {
        for local in &mut self.items {
            if local.sync == (ReadSync::Pending { batch: batch.id }) {
                local.sync = ReadSync::Synced;
            }
        }
    }

    /// Phase two, failure: restore the read state recorded in `batch` for
    /// entries still pending on it.
    pub fn reject_read(&mut self, batch: &ReadBatch) {
        for (id, read, read_at) in &batch.previous {
            if let Some(local) = self.items.iter_mut().find(|l| &l.notification.id == id) {
                if local.sync == (ReadSync::Pending { batch: batch.id }) {
                    local.notification.read = *read;
                    local.notification.read_at = *read_at;
                    local.sync = ReadSync::Synced;
                }
            }
        }
        self.recount();
    }

    /// Whether any notification awaits server confirmation.
    pub fn has_pending(&self) -> bool {
        self.items
            .iter()
            .any(|l| matches!(l.sync, ReadSync::Pending { .. }))
    }

    fn recount(&mut self) {
        self.unread_count = self.items.iter().filter(|l| !l.notification.read).count();
    }
}
