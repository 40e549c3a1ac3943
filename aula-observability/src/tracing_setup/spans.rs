//! Span definitions per subsystem: navigation, cache, notification stream.

/// Create a navigation span (pattern recording, prediction, preload).
#[macro_export]
macro_rules! navigation_span {
    ($route:expr) => {
        tracing::info_span!("aula.navigation", route = %$route)
    };
}

/// Create a cache span.
#[macro_export]
macro_rules! cache_span {
    ($storage_key:expr) => {
        tracing::debug_span!("aula.cache", storage_key = %$storage_key)
    };
}

/// Create a notification stream span.
#[macro_export]
macro_rules! stream_span {
    ($url:expr) => {
        tracing::info_span!("aula.stream", url = %$url)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const NAVIGATION: &str = "aula.navigation";
    pub const CACHE: &str = "aula.cache";
    pub const STREAM: &str = "aula.stream";
}
