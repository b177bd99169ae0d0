//! Configuration management for curbdesk.
//!
//! This module handles loading and validating the user configuration
//! file (`config.toml`), which describes the admin server, its endpoints,
//! the table source, and application settings.

mod server;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use server::{Endpoints, ServerConfig, ID_PLACEHOLDER};
pub use settings::{Settings, TableSettings, TableSource, DEFAULT_TICK_RATE_MS};

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "CURBDESK_CONFIG_DIR";

/// Name of the configuration file.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file is not valid TOML.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// The admin server.
    pub server: ServerConfig,
    /// Server paths.
    pub endpoints: Endpoints,
    /// Table behavior.
    pub table: TableSettings,
    /// Application settings.
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "Loading configuration");
        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.endpoints.validate()?;

        if self.settings.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        if let Some(level) = &self.settings.log_level {
            EnvFilter::try_new(level).map_err(|e| {
                ConfigError::ValidationError(format!("log_level '{}': {}", level, e))
            })?;
        }

        Ok(())
    }

    /// Get the configuration directory.
    ///
    /// Uses `CURBDESK_CONFIG_DIR` when set, otherwise the platform config
    /// directory with `curbdesk` appended.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        dirs::config_dir()
            .map(|dir| dir.join("curbdesk"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Get the path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_written_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.server.base_url = "https://admin.example.com".to_string();
        config.table.default_column = 3;
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
            [server]
            base_url = "https://admin.example.com"
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.base_url, "https://admin.example.com");
        assert_eq!(config.endpoints, Endpoints::default());
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[server\nbase_url = ").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_invalid_values_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"
            [settings]
            tick_rate_ms = 0
            "#,
        )
        .unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = Config::default();
        config.settings.log_level = Some("curbdesk=loud".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.settings.log_level = Some("curbdesk=debug,warn".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_config_dir_env_override() {
        let dir = TempDir::new().unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());

        let path = Config::config_path().unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(path, dir.path().join(CONFIG_FILE_NAME));
    }

    #[test]
    #[serial]
    fn test_load_uses_env_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
            [table]
            default_column = 1
            "#,
        )
        .unwrap();
        std::env::set_var(CONFIG_DIR_ENV, dir.path());

        let config = Config::load();
        std::env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(config.unwrap().table.default_column, 1);
    }
}
