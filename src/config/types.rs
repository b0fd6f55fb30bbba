use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

/// Defaults applied to every async-state controller built from config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Start an execution as soon as a controller is built (default: true).
    #[serde(default = "default_immediate")]
    pub immediate: bool,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: "trace", "debug", "info", "warn" or "error".
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Write logs to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Settings for the `async-state-demo` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Simulated producer latency in milliseconds (default: 250).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    /// Value the producer resolves with (default: 42).
    #[serde(default = "default_value")]
    pub value: i64,
    /// Number of executions to run (default: 2).
    #[serde(default = "default_attempts")]
    pub attempts: u32,
    /// When set, the producer fails with this message instead.
    #[serde(default)]
    pub fail_with: Option<String>,
}

fn default_immediate() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_delay_ms() -> u64 {
    250
}

fn default_value() -> i64 {
    42
}

fn default_attempts() -> u32 {
    2
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            immediate: default_immediate(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            value: default_value(),
            attempts: default_attempts(),
            fail_with: None,
        }
    }
}
