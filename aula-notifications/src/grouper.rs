//! Collapses related notifications into groups for display.
//!
//! Pure function of the current list: key each notification, bucket by
//! key, drop singletons, and summarize each bucket with a Spanish phrase
//! chosen by category.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use aula_core::models::{Notification, NotificationType};

/// Subject after "de", "en" or "para" in an academic title,
/// e.g. "Nueva tarea de Matemáticas" → "matemáticas".
static ACADEMIC_SUBJECT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:de|en|para)\s+(\w+)").ok());

/// Computes the grouping key of a notification.
pub trait IGroupKeyStrategy: Send + Sync {
    fn group_key(&self, notification: &Notification) -> String;
}

/// `category_type`, refined by title for academic and meeting notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicGroupKey;

impl IGroupKeyStrategy for HeuristicGroupKey {
    fn group_key(&self, notification: &Notification) -> String {
        let category = notification.category_or_default();
        let base = format!("{}_{}", category, notification.notification_type.as_str());
        match category {
            "academic" => match academic_subject(&notification.title) {
                Some(subject) => format!("{base}_{subject}"),
                None => base,
            },
            "meeting" => format!("{base}_{}", normalize_title(&notification.title)),
            _ => base,
        }
    }
}

/// Uses the server-assigned `groupKey`, falling back to the heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerGroupKey;

impl IGroupKeyStrategy for ServerGroupKey {
    fn group_key(&self, notification: &Notification) -> String {
        match notification.group_key.as_deref() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => HeuristicGroupKey.group_key(notification),
        }
    }
}

fn academic_subject(title: &str) -> Option<String> {
    let re = ACADEMIC_SUBJECT.as_ref()?;
    re.captures(title)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationGroup {
    pub key: String,
    pub category: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    /// Newest first.
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub latest_created_at: DateTime<Utc>,
}

impl NotificationGroup {
    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }
}

/// Group `notifications`; only buckets of two or more survive. Groups are
/// ordered by their newest notification, newest first.
pub fn group_notifications(
    notifications: &[Notification],
    strategy: &dyn IGroupKeyStrategy,
) -> Vec<NotificationGroup> {
    let mut buckets: BTreeMap<String, Vec<&Notification>> = BTreeMap::new();
    for n in notifications {
        buckets.entry(strategy.group_key(n)).or_default().push(n);
    }

    let mut groups: Vec<NotificationGroup> = buckets
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .filter_map(|(key, mut members)| {
            members.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            let newest = *members.first()?;
            let count = members.len();
            let category = newest.category_or_default().to_string();
            let (title, message) = phrase(&category, count);
            Some(NotificationGroup {
                key,
                notification_type: newest.notification_type,
                title,
                message,
                unread_count: members.iter().filter(|n| !n.read).count(),
                latest_created_at: newest.created_at,
                notifications: members.into_iter().cloned().collect(),
                category,
            })
        })
        .collect();

    groups.sort_by(|a, b| b.latest_created_at.cmp(&a.latest_created_at));
    groups
}

fn phrase(category: &str, count: usize) -> (String, String) {
    match category {
        "academic" => (
            format!("{count} actualizaciones académicas"),
            format!("Tienes {count} novedades sobre tus asignaturas"),
        ),
        "meeting" => (
            format!("{count} avisos de reunión"),
            format!("Hay {count} notificaciones sobre la misma reunión"),
        ),
        "attendance" => (
            format!("{count} registros de asistencia"),
            format!("Se registraron {count} cambios de asistencia"),
        ),
        "grades" => (
            format!("{count} calificaciones nuevas"),
            format!("Se publicaron {count} calificaciones"),
        ),
        "announcement" => (
            format!("{count} comunicados"),
            format!("Tienes {count} comunicados del establecimiento"),
        ),
        "system" => (
            format!("{count} avisos del sistema"),
            format!("El sistema generó {count} avisos"),
        ),
        _ => (
            format!("{count} notificaciones"),
            format!("Tienes {count} notificaciones relacionadas"),
        ),
    }
}
