use super::config::JwtConfig;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Source of the current time for token issuance and expiry checks
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Wall clock backed by [`Utc::now`]
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub admin: bool,
    pub exp: i64, // Expiration time (unix seconds)
    pub name: String,
}

/// Reasons a token could not be issued or was rejected.
///
/// Every rejection maps to the same `401 Unauthorized` response; the variant
/// is only ever logged.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no bearer token in Authorization header")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token expired at {exp}, now {now}")]
    Expired { exp: i64, now: i64 },

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
}

/// Issues HS256 tokens carrying `{admin: true, name, exp}`
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    claim_name: String,
    lifetime: chrono::Duration,
    clock: Clock,
}

impl TokenIssuer {
    pub fn new(config: &JwtConfig, clock: Clock) -> Self {
        Self {
            key: EncodingKey::from_secret(config.secret.as_bytes()),
            claim_name: config.claim_name.clone(),
            lifetime: chrono::Duration::from_std(config.lifetime)
                .unwrap_or(chrono::Duration::MAX),
            clock,
        }
    }

    pub fn issue(&self) -> Result<String, AuthError> {
        let now = (self.clock)();
        let exp = now
            .checked_add_signed(self.lifetime)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp();

        let claims = Claims {
            admin: true,
            exp,
            name: self.claim_name.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.key).map_err(AuthError::Signing)
    }
}

/// Verifies HS256 tokens against the shared secret and the injected clock
#[derive(Clone)]
pub struct TokenAuthenticator {
    key: DecodingKey,
    validation: Validation,
    clock: Clock,
}

impl TokenAuthenticator {
    pub fn new(config: &JwtConfig, clock: Clock) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against `clock` below, not the system time
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            clock,
        }
    }

    /// Check signature, algorithm and expiry. A token is valid up to and
    /// including its `exp` second.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;

        let now = (self.clock)().timestamp();
        if now > claims.exp {
            return Err(AuthError::Expired {
                exp: claims.exp,
                now,
            });
        }

        Ok(claims)
    }
}
