//! # aula-observability
//!
//! Structured logging for the Aula client layer: subscriber setup,
//! per-subsystem spans, and typed event helpers used by the other crates.

pub mod tracing_setup;

pub use tracing_setup::events;
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
