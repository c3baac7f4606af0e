use std::path::Path;

use crate::error::ConfigError;

/// Controller initialisation length after reset release, in ticks.
pub const DEFAULT_INIT_TICKS: u32 = 64;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Timing of the tick machine and of the host driver.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ticks after reset release before input is sampled.
    pub init_ticks: u32,
    /// Ticks between a debug bus request and its answer.
    pub query_latency: u32,
    /// Consecutive samples needed before a raw input level is accepted.
    pub debounce_ticks: u32,
    /// Ticks the host driver holds each actuation.
    pub hold_ticks: u32,
    /// Idle ticks the host driver inserts after each actuation.
    pub release_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            init_ticks: DEFAULT_INIT_TICKS,
            query_latency: 1,
            debounce_ticks: 1,
            hold_ticks: 2,
            release_ticks: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, or `None` if the file does not
    /// exist. The caller decides how to report the fallback.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>, ConfigError> {
        if path.exists() {
            Self::load(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.init_ticks == 0 {
            return Err(ConfigError::Validation(
                "engine.init_ticks must be >= 1".into(),
            ));
        }
        if engine.query_latency == 0 {
            return Err(ConfigError::Validation(
                "engine.query_latency must be >= 1".into(),
            ));
        }
        if engine.debounce_ticks == 0 {
            return Err(ConfigError::Validation(
                "engine.debounce_ticks must be >= 1".into(),
            ));
        }
        if engine.release_ticks == 0 {
            return Err(ConfigError::Validation(
                "engine.release_ticks must be >= 1".into(),
            ));
        }
        // A press shorter than the debounce window never registers.
        if engine.hold_ticks < engine.debounce_ticks {
            return Err(ConfigError::Validation(
                "engine.hold_ticks must be >= engine.debounce_ticks".into(),
            ));
        }
        if engine.release_ticks < engine.debounce_ticks {
            return Err(ConfigError::Validation(
                "engine.release_ticks must be >= engine.debounce_ticks".into(),
            ));
        }
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {LOG_LEVELS:?}, got '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
