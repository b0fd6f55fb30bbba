mod loader;
mod types;

pub use loader::{ConfigError, LOG_LEVELS, MAX_DELAY_MS};
pub use types::{Config, DemoConfig, Defaults, LoggingConfig};
