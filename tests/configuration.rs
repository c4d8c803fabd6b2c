//! Tests for configuration system

use std::collections::HashMap;

use portfolio::Config;
use portfolio_contact::TlsMode;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.mail.host, "localhost");
    assert_eq!(config.mail.port, 1025);
    assert_eq!(config.mail.tls, TlsMode::None);
    assert_eq!(config.mail.timeout_secs, 60);
    assert!(!config.contact.show_error_detail);
}

#[test]
fn test_default_config_is_valid() {
    let config = Config::load(None).expect("Failed to load config");

    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = Config::load(Some("config/does-not-exist.toml".to_string()))
        .expect("Failed to load config");

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.mail.sender, "website@localhost");
    assert_eq!(config.mail.recipient, "owner@localhost");
    assert!(config.validate().is_ok());
}

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_prefixed_env_beats_legacy_smtp_vars() {
    let config = Config::load_from(
        None,
        vars(&[
            ("SMTP_USERNAME", "legacy-user"),
            ("SMTP_PASSWORD", "legacy"),
            ("PORTFOLIO__MAIL__USERNAME", "prefixed-user"),
            ("PORTFOLIO__MAIL__PASSWORD", "prefixed"),
        ]),
    )
    .expect("Failed to load config");

    assert_eq!(config.mail.username, "prefixed-user");
    assert_eq!(config.mail.password, "prefixed");
}

#[test]
fn test_legacy_smtp_vars_override_file() {
    let config = Config::load_from(
        None,
        vars(&[("SMTP_USERNAME", "relay"), ("SMTP_PASSWORD", "legacy")]),
    )
    .expect("Failed to load config");

    assert_eq!(config.mail.username, "relay");
    assert_eq!(config.mail.password, "legacy");
}

#[test]
fn test_prefixed_env_overrides_file() {
    let config = Config::load_from(None, vars(&[("PORTFOLIO__SERVER__PORT", "8080")]))
        .expect("Failed to load config");

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.mail.host, "localhost");
}
