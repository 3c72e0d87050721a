use axum_helpers::JwtConfig;
use core_config::{
    AppInfo, ConfigError, FromEnv, app_info, prefixed_env_or_default, server::ServerConfig,
};
use database::postgres::PostgresConfig;
use tracing::Level;

pub use core_config::Environment;

/// Prefix tried before the bare variable name
pub const ENV_PREFIX: &str = "FERRUM";

/// Application configuration.
///
/// Composes the shared config components; every variable is read as
/// `FERRUM_<NAME>` first and `<NAME>` second. `Debug` output is safe to log:
/// the signing key and database password are redacted.
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub log_level: String,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub database: PostgresConfig,
}

impl FromEnv for Config {
    fn from_env() -> Result<Self, ConfigError> {
        let log_level = prefixed_env_or_default(ENV_PREFIX, "LOG_LEVEL", "info");
        log_level
            .parse::<Level>()
            .map_err(|e| ConfigError::parse("LOG_LEVEL", e))?;

        Ok(Self {
            app: app_info!(),
            environment: Environment::from_env(),
            log_level,
            server: ServerConfig::from_prefixed_env(ENV_PREFIX)?,
            jwt: JwtConfig::from_prefixed_env(ENV_PREFIX)?,
            database: PostgresConfig::from_prefixed_env(ENV_PREFIX)?,
        })
    }
}
