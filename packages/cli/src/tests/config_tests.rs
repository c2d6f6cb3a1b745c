use crate::config::{Config, ConfigError, StoreBackend};
use rstest::rstest;
use serial_test::serial;
use sleep_core::TransitionPolicy;
use std::env;
use std::time::Duration;

const VARS: &[&str] = &[
    "SLEEP_API_PORT",
    "PORT",
    "SLEEP_API_HOST",
    "SLEEP_CORS_ORIGIN",
    "SLEEP_STORE_BACKEND",
    "SLEEP_REMOTE_URL",
    "SLEEP_MOCK_LATENCY_MS",
    "SLEEP_STATUS_POLICY",
    "SLEEP_ADMIN_EMAIL",
    "SLEEP_ADMIN_PASSWORD",
    "SLEEP_ADMIN_TOKEN",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_from_env_defaults() {
    clear_env();

    let config = Config::from_env().unwrap();

    assert_eq!(config.port, 8000);
    assert_eq!(config.host.to_string(), "127.0.0.1");
    assert_eq!(config.cors_origin, "http://localhost:5173");
    assert_eq!(config.store_backend, StoreBackend::Memory);
    assert_eq!(config.remote_url, "http://localhost:8000/api");
    assert_eq!(config.mock_latency, Duration::ZERO);
    assert_eq!(config.status_policy, TransitionPolicy::Override);
    assert_eq!(config.admin_email, "admin@projectsleep.com");
    assert_eq!(config.admin_password, "admin");
    assert!(config.admin_token.is_none());
}

#[test]
#[serial]
fn test_sleep_port_wins_over_legacy_port() {
    clear_env();
    env::set_var("PORT", "3000");

    assert_eq!(Config::from_env().unwrap().port, 3000);

    env::set_var("SLEEP_API_PORT", "9000");
    assert_eq!(Config::from_env().unwrap().port, 9000);

    clear_env();
}

#[test]
#[serial]
fn test_config_with_all_custom() {
    clear_env();
    env::set_var("SLEEP_API_HOST", "0.0.0.0");
    env::set_var("SLEEP_CORS_ORIGIN", "https://projectsleep.com");
    env::set_var("SLEEP_STORE_BACKEND", "Remote");
    env::set_var("SLEEP_REMOTE_URL", "https://api.projectsleep.com/api");
    env::set_var("SLEEP_MOCK_LATENCY_MS", "500");
    env::set_var("SLEEP_STATUS_POLICY", "pending-only");
    env::set_var("SLEEP_ADMIN_EMAIL", "ops@projectsleep.com");
    env::set_var("SLEEP_ADMIN_PASSWORD", "hunter2");
    env::set_var("SLEEP_ADMIN_TOKEN", "static-token");

    let config = Config::from_env().unwrap();

    assert_eq!(config.host.to_string(), "0.0.0.0");
    assert_eq!(config.cors_origin, "https://projectsleep.com");
    assert_eq!(config.store_backend, StoreBackend::Remote);
    assert_eq!(config.remote_url, "https://api.projectsleep.com/api");
    assert_eq!(config.mock_latency, Duration::from_millis(500));
    assert_eq!(config.status_policy, TransitionPolicy::PendingOnly);
    assert_eq!(config.admin_email, "ops@projectsleep.com");
    assert_eq!(config.admin_password, "hunter2");
    assert_eq!(config.admin_token.as_deref(), Some("static-token"));

    clear_env();
}

#[test]
#[serial]
fn test_blank_admin_token_means_generated() {
    clear_env();
    env::set_var("SLEEP_ADMIN_TOKEN", "   ");

    assert!(Config::from_env().unwrap().admin_token.is_none());

    clear_env();
}

#[test]
#[serial]
fn test_config_port_zero() {
    clear_env();
    env::set_var("SLEEP_API_PORT", "0");

    let result = Config::from_env();

    assert!(matches!(result.unwrap_err(), ConfigError::PortOutOfRange(0)));

    clear_env();
}

#[rstest]
#[case("1", 1)]
#[case("80", 80)]
#[case("8080", 8080)]
#[case("65535", 65535)]
#[serial]
fn test_valid_port_numbers(#[case] port_str: &str, #[case] expected: u16) {
    clear_env();
    env::set_var("SLEEP_API_PORT", port_str);

    assert_eq!(Config::from_env().unwrap().port, expected);

    clear_env();
}

#[rstest]
#[case("-1")]
#[case("65536")]
#[case("1.5")]
#[case("not-a-number")]
#[serial]
fn test_invalid_port_formats(#[case] port_str: &str) {
    clear_env();
    env::set_var("SLEEP_API_PORT", port_str);

    assert!(matches!(
        Config::from_env().unwrap_err(),
        ConfigError::InvalidPort(_)
    ));

    clear_env();
}

#[rstest]
#[case("SLEEP_API_HOST", "localhost")]
#[case("SLEEP_STORE_BACKEND", "postgres")]
#[case("SLEEP_MOCK_LATENCY_MS", "fast")]
#[case("SLEEP_STATUS_POLICY", "first-come")]
#[serial]
fn test_invalid_values_are_rejected(#[case] var: &str, #[case] value: &str) {
    clear_env();
    env::set_var(var, value);

    assert!(Config::from_env().is_err());

    clear_env();
}

#[test]
fn test_config_error_display() {
    let error = ConfigError::PortOutOfRange(0);
    assert_eq!(error.to_string(), "Port 0 is out of valid range (1-65535)");

    let error = ConfigError::InvalidBackend("postgres".to_string());
    assert_eq!(error.to_string(), "Invalid store backend: postgres");
}
