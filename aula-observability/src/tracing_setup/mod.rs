//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use aula_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with structured JSON output.
///
/// Respects the `AULA_LOG` environment variable for filtering.
/// Defaults to `info` level if not set. Returns false if a global
/// subscriber was already installed.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env("AULA_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .try_init()
        .is_ok()
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) -> bool {
    let filter = EnvFilter::new(filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .json()
        .try_init()
        .is_ok()
}

/// Initialize from the `[observability]` config section. `AULA_LOG`
/// still wins over `log_level` when set.
pub fn init_tracing_from_config(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env("AULA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if config.json_logs {
        builder.json().try_init().is_ok()
    } else {
        builder.compact().try_init().is_ok()
    }
}
