// Single source of truth for all default values.

// --- Cache ---
pub const DEFAULT_CACHE_MAX_SIZE: usize = 100;
pub const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 300; // 5 minutes
pub const DEFAULT_CACHE_PERSISTENT: bool = false;
pub const DEFAULT_CACHE_COMPRESS: bool = false;

// --- Navigation ---
pub const DEFAULT_MAX_PATTERNS: usize = 100;
pub const DEFAULT_PREDICTION_THRESHOLD: f64 = 0.6;
pub const DEFAULT_HIGH_PRIORITY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_PRELOAD_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_HOVER_DELAY_MS: u64 = 100;
pub const DEFAULT_MAX_PRELOADED_ROUTES: u64 = 500;

// --- Notifications ---
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_STREAM_PATH: &str = "/api/notifications/stream";
pub const DEFAULT_NOTIFICATIONS_PATH: &str = "/api/notifications";
pub const DEFAULT_DESKTOP_THROTTLE_SECS: u64 = 30;
pub const DEFAULT_MAX_RECONNECT_ATTEMPTS: u32 = 3;
pub const DEFAULT_RECONNECT_BASE_MS: u64 = 1_000;
pub const DEFAULT_RECONNECT_MAX_MS: u64 = 30_000;
pub const DEFAULT_NOTIFICATION_LIMIT: usize = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_INITIAL_BACKOFF_MS: u64 = 500;
pub const DEFAULT_RETRY_MAX_BACKOFF_MS: u64 = 30_000;

// --- Forms ---
pub const DEFAULT_AUTOSAVE_MAX_AGE_HOURS: i64 = 24;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
