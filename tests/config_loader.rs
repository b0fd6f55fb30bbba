use async_state::config::{Config, ConfigError, DemoConfig, Defaults, LoggingConfig};
use async_state::AsyncStateOptions;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (temp_dir, path)
}

/// Test that Config::default() produces the expected values.
#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert!(config.defaults.immediate);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
    assert_eq!(config.demo.delay_ms, 250);
    assert_eq!(config.demo.value, 42);
    assert_eq!(config.demo.attempts, 2);
    assert!(config.demo.fail_with.is_none());
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_path_ends_with_expected() {
    let path = Config::config_path();
    assert!(path.ends_with("async-state/config.toml"));
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_full_config_parses() {
    let (_dir, path) = write_config(
        r#"
[defaults]
immediate = false

[logging]
level = "debug"
file = "/tmp/async-state.log"

[demo]
delay_ms = 10
value = 7
attempts = 3
fail_with = "boom"
"#,
    );

    let config = Config::load_from(&path).unwrap();
    assert_eq!(
        config,
        Config {
            defaults: Defaults { immediate: false },
            logging: LoggingConfig {
                level: "debug".to_string(),
                file: Some(PathBuf::from("/tmp/async-state.log")),
            },
            demo: DemoConfig {
                delay_ms: 10,
                value: 7,
                attempts: 3,
                fail_with: Some("boom".to_string()),
            },
        }
    );
}

#[test]
fn test_partial_config_fills_defaults() {
    let (_dir, path) = write_config("[demo]\nvalue = 1\n");

    let config = Config::load_from(&path).unwrap();
    assert!(config.defaults.immediate);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.demo.value, 1);
    assert_eq!(config.demo.attempts, 2);
}

#[test]
fn test_empty_file_is_default() {
    let (_dir, path) = write_config("");
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let (_dir, path) = write_config("[defaults\nimmediate = ");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn test_wrong_type_is_parse_error() {
    let (_dir, path) = write_config("[defaults]\nimmediate = \"yes\"\n");
    assert!(matches!(
        Config::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn test_unknown_log_level_rejected() {
    let (_dir, path) = write_config("[logging]\nlevel = \"loud\"\n");
    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError { .. }));
    assert!(err.to_string().contains("loud"));
}

#[test]
fn test_log_level_is_case_insensitive() {
    let mut config = Config::default();
    config.logging.level = "WARN".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_attempts_rejected() {
    let mut config = Config::default();
    config.demo.attempts = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn test_excessive_delay_rejected() {
    let mut config = Config::default();
    config.demo.delay_ms = async_state::config::MAX_DELAY_MS + 1;
    assert!(config.validate().is_err());
}

#[test]
fn test_defaults_feed_async_state_options() {
    let config = Config::parse("[defaults]\nimmediate = false\n").unwrap();
    let options = AsyncStateOptions::<u8>::from(&config.defaults);
    assert!(!options.immediate);
}
