//! Reconnect policy for the notification stream.
//!
//! Only definitively closed connections are retried. Delays grow as
//! `base × 2^attempt`, capped. After `max_attempts` consecutive failures
//! the controller gives up; a successful open resets the count.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use aula_core::config::NotificationConfig;
use aula_core::errors::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub base: Duration,
    pub max: Duration,
    pub max_attempts: u32,
}

impl ReconnectPolicy {
    pub fn from_config(config: &NotificationConfig) -> Self {
        Self {
            base: Duration::from_millis(config.reconnect_base_ms),
            max: Duration::from_millis(config.reconnect_max_ms),
            max_attempts: config.max_reconnect_attempts,
        }
    }

    /// Delay before reconnect number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base.saturating_mul(factor).min(self.max)
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::from_config(&NotificationConfig::default())
    }
}

/// What the stream task should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconnectDecision {
    /// Transient error; keep the current connection.
    Ignore,
    /// Reconnect after `delay`. `attempt` is one-based.
    Retry { attempt: u32, delay: Duration },
    /// Attempts exhausted; surface the terminal error.
    GiveUp { attempts: u32 },
    /// Teardown in progress; do nothing.
    Stopped,
}

#[derive(Debug)]
pub struct ReconnectController {
    policy: ReconnectPolicy,
    attempts: u32,
    cleanup: Arc<AtomicBool>,
}

impl ReconnectController {
    pub fn new(policy: ReconnectPolicy, cleanup: Arc<AtomicBool>) -> Self {
        Self {
            policy,
            attempts: 0,
            cleanup,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_stopped(&self) -> bool {
        self.cleanup.load(Ordering::SeqCst)
    }

    pub fn on_open(&mut self) {
        self.attempts = 0;
    }

    pub fn on_error(&mut self, error: &StreamError) -> ReconnectDecision {
        if self.is_stopped() {
            return ReconnectDecision::Stopped;
        }
        if !error.is_closed() {
            return ReconnectDecision::Ignore;
        }
        if self.attempts >= self.policy.max_attempts {
            return ReconnectDecision::GiveUp {
                attempts: self.attempts,
            };
        }
        let delay = self.policy.delay_for(self.attempts);
        self.attempts += 1;
        ReconnectDecision::Retry {
            attempt: self.attempts,
            delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_double_and_cap() {
        let policy = ReconnectPolicy::default();
        let delays: Vec<u64> = (0..7).map(|a| policy.delay_for(a).as_millis() as u64).collect();
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 16_000, 30_000, 30_000]);
        assert_eq!(policy.delay_for(64), Duration::from_millis(30_000));
    }

    #[test]
    fn transient_errors_are_ignored() {
        let mut controller =
            ReconnectController::new(ReconnectPolicy::default(), Arc::new(AtomicBool::new(false)));
        let decision = controller.on_error(&StreamError::Transient {
            reason: "chunk timeout".into(),
        });
        assert_eq!(decision, ReconnectDecision::Ignore);
        assert_eq!(controller.attempts(), 0);
    }
}
