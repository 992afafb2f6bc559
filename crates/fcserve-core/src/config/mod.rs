//! Application configuration schemas.
//!
//! Configuration is merged from optional TOML files and `FCSERVE__*`
//! environment variables via the `config` crate, then checked with
//! `validator`. Every section has defaults, so an empty configuration is
//! a working one.

pub mod app;
pub mod catalog;
pub mod engine;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::app::ServerConfig;
use self::catalog::CatalogConfig;
use self::engine::EngineConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`FCSERVE__SERVER__PORT`).
pub const ENV_PREFIX: &str = "FCSERVE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[validate(nested)]
    pub server: ServerConfig,
    /// External CAD engine settings.
    #[validate(nested)]
    pub engine: EngineConfig,
    /// Models directory settings.
    #[validate(nested)]
    pub catalog: CatalogConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Sources, lowest precedence first: `config/default.toml`,
    /// `config/{env}.toml`, the explicit file (if any) and finally
    /// environment variables prefixed with `FCSERVE__`.
    pub fn load(env: &str, explicit: Option<&Path>) -> Result<Self, AppError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(toml: &str) -> Result<Self, AppError> {
        let config: Self = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }
}
