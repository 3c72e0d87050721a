//! Authentication module.
//!
//! This module provides:
//! - HS256 token issuance and verification against an injectable clock
//! - Authentication middleware for protected routes
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, TokenAuthenticator, jwt_auth_middleware, system_clock};
//!
//! let config = JwtConfig::from_prefixed_env("FERRUM")?;
//! let auth = TokenAuthenticator::new(&config, system_clock());
//!
//! // Protect routes with JWT middleware
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{AuthError, Claims, Clock, TokenAuthenticator, TokenIssuer, system_clock};
pub use middleware::jwt_auth_middleware;
