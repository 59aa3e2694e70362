//! Application configuration
//!
//! Sources, lowest precedence first:
//! 1. Built-in defaults
//! 2. Optional file `config/celltrack.{toml,yaml,json}`
//! 3. Environment variables `CELLTRACK__<SECTION>__<KEY>`
//!
//! A `.env` file in the working directory is read before the environment.

use celltrack_core::errors::{ExError, ExErrorKind};
use celltrack_core::logging_facility::Profile;
use celltrack_core_types::Sensitive;
use celltrack_store::PoolSettings;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "config/celltrack";
pub const DEFAULT_ENV_PREFIX: &str = "CELLTRACK";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid setting {setting}: {message}")]
    Invalid { setting: String, message: String },
}

impl From<ConfigError> for ExError {
    fn from(err: ConfigError) -> Self {
        ExError::new(ExErrorKind::Configuration)
            .with_op("load_config")
            .with_message(err.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub shifts: ShiftConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Connection URL; may embed credentials, so it is never printed
    pub url: Sensitive<String>,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub create_if_missing: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub profile: Profile,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShiftConfig {
    /// Refuse a second active shift for the same user
    pub enforce_single_active: bool,
}

impl AppConfig {
    /// Load from the default file and environment prefix, then validate
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load_from(DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX)
    }

    /// Load from an explicit file stem and environment prefix, then validate
    pub fn load_from(config_file: &str, env_prefix: &str) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .set_default("database.url", "sqlite://celltrack.db")?
            .set_default("database.max_connections", 5)?
            .set_default("database.acquire_timeout_secs", 30)?
            .set_default("database.create_if_missing", true)?
            .set_default("logging.profile", "development")?
            .set_default("shifts.enforce_single_active", false)?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.expose().trim().is_empty() {
            return Err(ConfigError::Invalid {
                setting: "database.url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                setting: "database.max_connections".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            url: self.database.url.expose().clone(),
            max_connections: self.database.max_connections,
            acquire_timeout: Duration::from_secs(self.database.acquire_timeout_secs),
            create_if_missing: self.database.create_if_missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(url: &str, max_connections: u32) -> AppConfig {
        AppConfig {
            database: DatabaseConfig {
                url: Sensitive::new(url.to_string()),
                max_connections,
                acquire_timeout_secs: 30,
                create_if_missing: true,
            },
            logging: LoggingConfig {
                profile: Profile::Development,
            },
            shifts: ShiftConfig {
                enforce_single_active: false,
            },
        }
    }

    #[test]
    fn test_validation_rejects_zero_connections() {
        let err = config_with("sqlite::memory:", 0).validate().unwrap_err();
        assert!(err.to_string().contains("database.max_connections"));
    }

    #[test]
    fn test_validation_rejects_empty_url() {
        assert!(config_with("  ", 5).validate().is_err());
    }

    #[test]
    fn test_debug_output_hides_url() {
        let cfg = config_with("sqlite:///srv/secret-plant.db", 5);
        assert!(!format!("{:?}", cfg).contains("secret-plant"));
    }

    #[test]
    fn test_config_error_maps_to_configuration_kind() {
        let err: ExError = ConfigError::Invalid {
            setting: "database.url".to_string(),
            message: "must not be empty".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Configuration);
    }
}
