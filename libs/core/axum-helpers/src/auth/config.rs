//! Configuration types for token authentication.
//!
//! Follows the same `{PREFIX}_{NAME}` then `NAME` lookup as
//! `core_config::server::ServerConfig` and `database::postgres::PostgresConfig`.

use core_config::{ConfigError, duration::parse_duration, prefixed_env_or_default};
use std::time::Duration;

pub const DEFAULT_SIGNING_KEY: &str = "deadbeef";

/// JWT signing and claim configuration.
///
/// Loaded from environment variables:
/// - `HTTP_JWT_SIGNING_KEY` (default: `deadbeef`) - HMAC secret
/// - `HTTP_JWT_CLAIM_NAME` (default: `ferrum`) - value of the `name` claim
/// - `HTTP_JWT_EXPIRATION` (default: `1h`) - token lifetime
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub claim_name: String,
    pub lifetime: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, claim_name: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            secret: secret.into(),
            claim_name: claim_name.into(),
            lifetime,
        }
    }

    /// Whether the built-in development key is in use
    pub fn uses_default_secret(&self) -> bool {
        self.secret == DEFAULT_SIGNING_KEY
    }

    pub fn from_prefixed_env(prefix: &str) -> Result<Self, ConfigError> {
        let secret = prefixed_env_or_default(prefix, "HTTP_JWT_SIGNING_KEY", DEFAULT_SIGNING_KEY);
        if secret.is_empty() {
            return Err(ConfigError::parse("HTTP_JWT_SIGNING_KEY", "must not be empty"));
        }

        let claim_name = prefixed_env_or_default(prefix, "HTTP_JWT_CLAIM_NAME", "ferrum");

        let lifetime = parse_duration(&prefixed_env_or_default(prefix, "HTTP_JWT_EXPIRATION", "1h"))
            .map_err(|e| ConfigError::parse("HTTP_JWT_EXPIRATION", e))?;

        Ok(Self {
            secret,
            claim_name,
            lifetime,
        })
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("claim_name", &self.claim_name)
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 6] = [
        "FERRUM_HTTP_JWT_SIGNING_KEY",
        "HTTP_JWT_SIGNING_KEY",
        "FERRUM_HTTP_JWT_CLAIM_NAME",
        "HTTP_JWT_CLAIM_NAME",
        "FERRUM_HTTP_JWT_EXPIRATION",
        "HTTP_JWT_EXPIRATION",
    ];

    #[test]
    fn test_jwt_config_defaults() {
        temp_env::with_vars_unset(VARS, || {
            let config = JwtConfig::from_prefixed_env("FERRUM").unwrap();
            assert_eq!(config.secret, "deadbeef");
            assert_eq!(config.claim_name, "ferrum");
            assert_eq!(config.lifetime, Duration::from_secs(3600));
            assert!(config.uses_default_secret());
        });
    }

    #[test]
    fn test_jwt_config_from_env_custom() {
        temp_env::with_vars(
            [
                ("FERRUM_HTTP_JWT_SIGNING_KEY", Some("s3cret")),
                ("HTTP_JWT_CLAIM_NAME", Some("frodo")),
                ("FERRUM_HTTP_JWT_EXPIRATION", Some("90s")),
            ],
            || {
                let config = JwtConfig::from_prefixed_env("FERRUM").unwrap();
                assert_eq!(config.secret, "s3cret");
                assert_eq!(config.claim_name, "frodo");
                assert_eq!(config.lifetime, Duration::from_secs(90));
                assert!(!config.uses_default_secret());
            },
        );
    }

    #[test]
    fn test_jwt_config_invalid_expiration() {
        temp_env::with_vars(
            [
                ("FERRUM_HTTP_JWT_EXPIRATION", Some("forever")),
                ("HTTP_JWT_EXPIRATION", None),
            ],
            || {
                let err = JwtConfig::from_prefixed_env("FERRUM").unwrap_err();
                assert!(err.to_string().contains("HTTP_JWT_EXPIRATION"));
            },
        );
    }

    #[test]
    fn test_jwt_config_debug_redacts_secret() {
        let config = JwtConfig::new("hunter2", "ferrum", Duration::from_secs(60));
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
