use aula_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = AulaConfig::from_toml("").unwrap();

    // Cache defaults
    assert_eq!(config.cache.max_size, 100);
    assert_eq!(config.cache.max_age_secs, 300);
    assert!(!config.cache.persistent);
    assert_eq!(config.cache.storage_key, "intelligent-cache");

    // Navigation defaults
    assert_eq!(config.navigation.max_patterns, 100);
    assert_eq!(config.navigation.prediction_threshold, 0.6);
    assert_eq!(config.navigation.high_priority_threshold, 0.8);
    assert_eq!(config.navigation.preload_timeout_ms, 2_000);
    assert_eq!(config.navigation.hover_delay_ms, 100);
    assert_eq!(config.navigation.storage_key, "navigation-patterns");

    // Notification defaults
    assert_eq!(config.notifications.desktop_throttle_secs, 30);
    assert_eq!(config.notifications.max_reconnect_attempts, 3);
    assert_eq!(config.notifications.reconnect_base_ms, 1_000);
    assert_eq!(config.notifications.reconnect_max_ms, 30_000);

    // Forms defaults
    assert_eq!(config.forms.autosave_key, "advanced-form-autosave");
    assert_eq!(config.forms.autosave_max_age_hours, 24);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[cache]
max_size = 10
persistent = true

[notifications]
base_url = "https://colegio.example.cl/"
"#;
    let config = AulaConfig::from_toml(toml).unwrap();
    assert_eq!(config.cache.max_size, 10);
    assert!(config.cache.persistent);
    // Non-overridden fields keep defaults
    assert_eq!(config.cache.max_age_secs, 300);
    assert_eq!(
        config.notifications.stream_url(),
        "https://colegio.example.cl/api/notifications/stream"
    );
    assert_eq!(
        config.notifications.notifications_url(),
        "https://colegio.example.cl/api/notifications"
    );
}

#[test]
fn config_rejects_malformed_toml() {
    let err = AulaConfig::from_toml("[cache\nmax_size = ").unwrap_err();
    assert!(err.to_string().contains("invalid configuration"));
}

#[test]
fn config_serde_roundtrip() {
    let config = AulaConfig::default();
    let toml_str = config.to_toml().unwrap();
    let roundtripped = AulaConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.cache.max_size, config.cache.max_size);
    assert_eq!(
        roundtripped.navigation.prediction_threshold,
        config.navigation.prediction_threshold
    );
}

#[test]
fn duration_helpers_match_raw_fields() {
    let config = AulaConfig::default();
    assert_eq!(config.cache.max_age().as_secs(), 300);
    assert_eq!(config.navigation.preload_timeout().as_millis(), 2_000);
    assert_eq!(config.navigation.hover_delay().as_millis(), 100);
    assert_eq!(config.notifications.desktop_throttle().as_secs(), 30);
    assert_eq!(config.forms.autosave_max_age(), chrono::Duration::hours(24));
}
