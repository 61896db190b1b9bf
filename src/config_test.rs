use super::*;

#[test]
fn default_matches_page_markup() {
    let config = PageConfig::default();
    assert_eq!(config.toggle_id, "theme-toggle");
    assert_eq!(config.countdown_id, "countdown");
    assert_eq!(config.storage_key, "theme");
    assert_eq!(config.light_class, "light-mode");
    assert_eq!(config.countdown_seconds, 5);
    assert_eq!(config.redirect_path, "/");
    assert_eq!(config.tick_period(), Duration::from_secs(1));
}

#[test]
fn from_json_empty_object_is_default() {
    let config = PageConfig::from_json("{}").expect("config");
    assert_eq!(config, PageConfig::default());
}

#[test]
fn from_json_overrides_only_given_fields() {
    let config = PageConfig::from_json(r#"{"countdown_seconds": 10, "redirect_path": "/home"}"#).expect("config");
    assert_eq!(config.countdown_seconds, 10);
    assert_eq!(config.redirect_path, "/home");
    assert_eq!(config.storage_key, "theme");
}

#[test]
fn from_json_rejects_zero_tick() {
    let err = PageConfig::from_json(r#"{"tick_ms": 0}"#).expect_err("zero tick");
    assert!(matches!(err, ConfigError::ZeroTick));
}

#[test]
fn from_json_rejects_tick_beyond_browser_timer_limit() {
    let err = PageConfig::from_json(r#"{"tick_ms": 2147483648}"#).expect_err("too large");
    assert!(matches!(err, ConfigError::TickTooLarge(2_147_483_648)));
    let config = PageConfig::from_json(r#"{"tick_ms": 2147483647}"#).expect("at limit");
    assert_eq!(config.tick_ms, MAX_TICK_MS);
}

#[test]
fn from_json_rejects_malformed_input() {
    let err = PageConfig::from_json("{not json").expect_err("malformed");
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn from_json_or_default_falls_back() {
    assert_eq!(PageConfig::from_json_or_default(None), PageConfig::default());
    assert_eq!(PageConfig::from_json_or_default(Some("  ")), PageConfig::default());
    assert_eq!(PageConfig::from_json_or_default(Some("[1,2]")), PageConfig::default());
    assert_eq!(
        PageConfig::from_json_or_default(Some(r#"{"tick_ms": 250}"#)).tick_ms,
        250
    );
}
