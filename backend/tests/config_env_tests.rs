mod support;

use std::path::PathBuf;

use schedule_chart::config::{AppConfig, ConfigError};
use support::with_scoped_env;

const KEYS: [&str; 5] = [
    "HOST",
    "PORT",
    "CHART_OUTPUT_DIR",
    "CHART_STATIC_DIR",
    "CHART_MEASURE_TEXT",
];

fn cleared() -> Vec<(&'static str, Option<&'static str>)> {
    KEYS.iter().map(|k| (*k, None)).collect()
}

#[test]
fn test_no_env_keeps_defaults() {
    with_scoped_env(&cleared(), || {
        let config = AppConfig::default().apply_env().unwrap();
        assert_eq!(config, AppConfig::default());
    });
}

#[test]
fn test_env_overrides() {
    let mut changes = cleared();
    changes.extend([
        ("HOST", Some("127.0.0.1")),
        ("PORT", Some("9100")),
        ("CHART_OUTPUT_DIR", Some("/tmp/charts")),
        ("CHART_MEASURE_TEXT", Some("false")),
    ]);

    with_scoped_env(&changes, || {
        let config = AppConfig::default().apply_env().unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.storage.output_dir, PathBuf::from("/tmp/charts"));
        assert_eq!(config.storage.static_dir, PathBuf::from("static"));
        assert!(!config.chart.measure_text);
    });
}

#[test]
fn test_invalid_port() {
    let mut changes = cleared();
    changes.push(("PORT", Some("eighty")));

    with_scoped_env(&changes, || {
        let err = AppConfig::default().apply_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { ref key, .. } if key == "PORT"));
    });
}

#[test]
fn test_invalid_measure_flag() {
    let mut changes = cleared();
    changes.push(("CHART_MEASURE_TEXT", Some("sometimes")));

    with_scoped_env(&changes, || {
        assert!(AppConfig::default().apply_env().is_err());
    });
}

#[test]
fn test_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("schedule-chart.toml");
    std::fs::write(&path, "[server]\nport = 7000\nhost = \"localhost\"\n").unwrap();

    let mut changes = cleared();
    changes.push(("PORT", Some("7001")));

    with_scoped_env(&changes, || {
        let config = AppConfig::from_file(&path).unwrap().apply_env().unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.server.port, 7001);
    });
}
