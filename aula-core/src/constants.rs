/// Aula client layer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Durable storage keys ---

/// Navigation pattern table (JSON array of `NavigationPattern`).
pub const NAVIGATION_PATTERNS_KEY: &str = "navigation-patterns";

/// Default key for the multi-step form autosave snapshot.
pub const FORM_AUTOSAVE_KEY: &str = "advanced-form-autosave";

/// Default key for the persisted generic cache map.
pub const INTELLIGENT_CACHE_KEY: &str = "intelligent-cache";

/// UI layout preferences.
pub const LAYOUT_PREFERENCES_KEY: &str = "layout-preferences";

/// Message shown once the notification stream gives up reconnecting.
pub const STREAM_UNAVAILABLE_MESSAGE: &str =
    "Las notificaciones en tiempo real no están disponibles. Por favor, recarga la página.";
