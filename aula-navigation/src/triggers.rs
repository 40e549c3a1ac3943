//! Prefetch triggers driven by link interaction.
//!
//! Hover uses a debounce: the prefetch fires only if the pointer stays on
//! the link for the hover delay. Visibility fires at most once per route
//! until disconnected.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use aula_core::PreloadPriority;

use crate::preloader::Preloader;

/// Pending timers keyed by route, each tagged with the generation that
/// spawned it.
type PendingMap = Arc<Mutex<HashMap<String, (u64, JoinHandle<()>)>>>;

/// Drop `route`'s timer only if it still belongs to `generation`.
fn release(pending: &PendingMap, route: &str, generation: u64) {
    if let Ok(mut timers) = pending.lock() {
        if timers.get(route).is_some_and(|(g, _)| *g == generation) {
            timers.remove(route);
        }
    }
}

/// Debounced hover prefetching. Owns its timers; dropping it or calling
/// [`teardown`](Self::teardown) cancels all of them.
pub struct HoverTrigger {
    preloader: Arc<Preloader>,
    delay: Duration,
    pending: PendingMap,
    generation: AtomicU64,
}

impl HoverTrigger {
    pub fn new(preloader: Arc<Preloader>, delay: Duration) -> Self {
        Self {
            preloader,
            delay,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Start the debounce timer for `route`, restarting it if one is
    /// already pending. Outside a tokio runtime the hover is ignored.
    pub fn hover_start(&self, route: &str) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::debug!(route = %route, "hover ignored outside tokio runtime");
                return;
            }
        };

        let Ok(mut pending) = self.pending.lock() else {
            return;
        };
        if let Some((_, previous)) = pending.remove(route) {
            previous.abort();
        }

        let preloader = Arc::clone(&self.preloader);
        let timers = Arc::clone(&self.pending);
        let delay = self.delay;
        let owned = route.to_string();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;
        let task = handle.spawn(async move {
            tokio::time::sleep(delay).await;
            release(&timers, &owned, generation);
            preloader.preload(&owned, PreloadPriority::High);
        });
        pending.insert(route.to_string(), (generation, task));
    }

    /// Cancel the pending timer for `route`, if any.
    pub fn hover_end(&self, route: &str) {
        if let Ok(mut pending) = self.pending.lock() {
            if let Some((_, task)) = pending.remove(route) {
                task.abort();
            }
        }
    }

    /// Timers that have not fired yet.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// Cancel every pending timer.
    pub fn teardown(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            for (_, (_, task)) in pending.drain() {
                task.abort();
            }
        }
    }
}

impl Drop for HoverTrigger {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Prefetches links as they scroll into view.
pub struct VisibilityTrigger {
    preloader: Arc<Preloader>,
    seen: Mutex<HashSet<String>>,
}

impl VisibilityTrigger {
    pub fn new(preloader: Arc<Preloader>) -> Self {
        Self {
            preloader,
            seen: Mutex::new(HashSet::new()),
        }
    }

    /// A link to `route` became visible. Returns whether a prefetch was
    /// issued. A route whose prefetch fails is forgotten so the next
    /// sighting retries it.
    pub fn on_visible(&self, route: &str) -> bool {
        let first_sighting = self
            .seen
            .lock()
            .map(|mut seen| seen.insert(route.to_string()))
            .unwrap_or(false);
        if !first_sighting {
            return false;
        }
        let issued = self.preloader.preload(route, PreloadPriority::Low);
        if !issued && !self.preloader.is_preloaded(route) {
            if let Ok(mut seen) = self.seen.lock() {
                seen.remove(route);
            }
        }
        issued
    }

    /// Stop observing: forget every route seen so far.
    pub fn disconnect(&self) {
        if let Ok(mut seen) = self.seen.lock() {
            seen.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stale_timer_leaves_newer_handle_in_place() {
        let pending: PendingMap = Arc::new(Mutex::new(HashMap::new()));
        let newer = tokio::spawn(std::future::pending::<()>());
        pending
            .lock()
            .unwrap()
            .insert("/apoderado/notas".to_string(), (2, newer));

        release(&pending, "/apoderado/notas", 1);
        assert!(pending.lock().unwrap().contains_key("/apoderado/notas"));

        release(&pending, "/apoderado/notas", 2);
        assert!(pending.lock().unwrap().is_empty());
    }
}
