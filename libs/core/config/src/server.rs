use crate::duration::parse_duration;
use crate::{env_or_default, prefixed_env_or_default, ConfigError};
use std::net::Ipv4Addr;
use std::time::Duration;

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for a single request's store work and for the shutdown drain
    pub request_timeout: Duration,
    /// Largest accepted request body, in bytes
    pub max_body_bytes: usize,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self {
            host,
            port,
            ..Self::default()
        }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reads the HTTP settings, trying `{prefix}_KEY` before `KEY`.
    ///
    /// - HOST: defaults to 0.0.0.0 (never prefixed)
    /// - HTTP_API_PORT: defaults to 80
    /// - HTTP_REQUEST_TIMEOUT: defaults to 3s
    /// - HTTP_MAX_POST_SIZE: defaults to 1048576 (1 MiB)
    pub fn from_prefixed_env(prefix: &str) -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());

        let port = prefixed_env_or_default(prefix, "HTTP_API_PORT", "80")
            .parse()
            .map_err(|e| ConfigError::parse("HTTP_API_PORT", e))?;

        let request_timeout =
            parse_duration(&prefixed_env_or_default(prefix, "HTTP_REQUEST_TIMEOUT", "3s"))
                .map_err(|e| ConfigError::parse("HTTP_REQUEST_TIMEOUT", e))?;

        let max_body_bytes = prefixed_env_or_default(prefix, "HTTP_MAX_POST_SIZE", "1048576")
            .parse()
            .map_err(|e| ConfigError::parse("HTTP_MAX_POST_SIZE", e))?;

        Ok(Self {
            host,
            port,
            request_timeout,
            max_body_bytes,
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: 80,
            request_timeout: Duration::from_secs(3),
            max_body_bytes: 1 << 20,
        }
    }
}
