//! Runtime configuration.
//!
//! Layered loading: defaults, then an optional `lernex.toml`, then
//! `LERNEX_`-prefixed environment variables (`LERNEX_DATABASE__URL`
//! overrides `database.url`).

use serde::Deserialize;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    /// Tracing filter directive for binaries (`info`, `lernex_core=debug`, ...).
    pub log_filter: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .set_default("database.url", "postgres://localhost:5432/lernex")
            .map_err(config_err)?
            .set_default("database.max_connections", 5)
            .map_err(config_err)?
            .set_default("log_filter", "info")
            .map_err(config_err)?
            .add_source(config::File::with_name("lernex").required(false))
            .add_source(
                config::Environment::with_prefix("LERNEX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        config.try_deserialize().map_err(config_err)
    }
}

fn config_err(err: config::ConfigError) -> CoreError {
    CoreError::Config(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_file_or_env() {
        let settings = Settings::load().unwrap();
        assert_eq!(settings.database.max_connections, 5);
        assert_eq!(settings.log_filter, "info");
        assert!(settings.database.url.starts_with("postgres://"));
    }
}
