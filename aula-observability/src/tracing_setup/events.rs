//! Structured log events for key client-side operations.
//!
//! Each function emits a `tracing` event with structured fields.

use std::time::Duration;

/// A route transition was folded into the pattern table.
pub fn pattern_recorded(from: &str, to: &str, frequency: u32) {
    tracing::debug!(
        event = "pattern_recorded",
        from = %from,
        to = %to,
        frequency = frequency,
        "navigation pattern recorded"
    );
}

/// A prefetch hint was issued for a route.
pub fn preload_issued(route: &str, priority: &str) {
    tracing::debug!(
        event = "preload_issued",
        route = %route,
        priority = %priority,
        "route preload issued"
    );
}

/// An entry was evicted from a bounded cache.
pub fn cache_evicted(key: &str, reason: &str) {
    tracing::debug!(
        event = "cache_evicted",
        key = %key,
        reason = %reason,
        "cache entry evicted"
    );
}

/// A best-effort storage read or write failed and was swallowed.
pub fn storage_failure(key: &str, operation: &str, error: &str) {
    tracing::warn!(
        event = "storage_failure",
        key = %key,
        operation = %operation,
        error = %error,
        "durable storage operation failed"
    );
}

/// The stream client scheduled a reconnect.
pub fn stream_reconnect_scheduled(attempt: u32, max_attempts: u32, delay: Duration) {
    tracing::info!(
        event = "stream_reconnect_scheduled",
        attempt = attempt,
        max_attempts = max_attempts,
        delay_ms = delay.as_millis() as u64,
        "notification stream reconnect scheduled"
    );
}

/// The stream client gave up reconnecting.
pub fn stream_exhausted(attempts: u32) {
    tracing::warn!(
        event = "stream_exhausted",
        attempts = attempts,
        "notification stream unavailable after reconnect attempts"
    );
}

/// A desktop alert was shown for a notification.
pub fn desktop_alert_sent(notification_id: &str) {
    tracing::info!(
        event = "desktop_alert_sent",
        notification_id = %notification_id,
        "desktop alert sent"
    );
}
