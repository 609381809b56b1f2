//! Configuration module for favr
//!
//! Manages application configuration: where the registry database lives,
//! default verbosity, and whether `clear` asks for confirmation.
//! Configuration is stored in the user's config directory and can be
//! overridden with `FAVR_`-prefixed environment variables
//! (e.g. `FAVR_QUIET=true`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "FAVR";

fn default_log_level() -> String {
    "warn".to_string()
}

const fn default_true() -> bool {
    true
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FavrConfig {
    /// Path of the registry database; defaults to the user data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Ask before clearing all favorites
    #[serde(default = "default_true")]
    pub confirm_clear: bool,
}

impl Default for FavrConfig {
    fn default() -> Self {
        Self {
            database: None,
            quiet: false,
            log_level: default_log_level(),
            confirm_clear: true,
        }
    }
}

impl FavrConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("favr").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::default().save_to(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, layered with environment overrides
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or does not match the
    /// configuration structure.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Resolve the registry database path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the system data
    /// directory cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("favr").join("registry"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = FavrConfig::default();
        assert!(config.database.is_none());
        assert!(!config.quiet);
        assert_eq!(config.log_level, "warn");
        assert!(config.confirm_clear);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = FavrConfig {
            database: Some(PathBuf::from("/tmp/favr_registry")),
            quiet: true,
            log_level: "debug".to_string(),
            confirm_clear: false,
        };
        config.save_to(&path).unwrap();

        let loaded = FavrConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = FavrConfig::load_from(&path).unwrap();
        assert!(loaded.quiet);
        assert_eq!(loaded.log_level, "warn");
        assert!(loaded.confirm_clear);
        assert!(loaded.database.is_none());
    }

    #[test]
    fn test_persistence_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        FavrConfig::default().save_to(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("log_level = \"warn\""));
        assert!(!content.contains("database"));
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = FavrConfig {
            database: Some(PathBuf::from("/srv/favr")),
            ..FavrConfig::default()
        };
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/srv/favr"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "quiet = [not toml").unwrap();

        assert!(FavrConfig::load_from(&path).is_err());
    }
}
