//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: HS256 token issuance, verification and middleware
//! - **[`server`]**: Serving with graceful drain, health responses, shutdown coordination
//! - **[`http`]**: HTTP middleware (CORS, default content type)
//! - **[`errors`]**: Plain-text error responses
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{ShutdownCoordinator, serve_until_shutdown, trace_layer};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let coordinator = ShutdownCoordinator::new();
//!     coordinator.listen_for_signals();
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     let router = trace_layer(Router::new());
//!     serve_until_shutdown(listener, router, &coordinator, Duration::from_secs(3)).await?;
//!     Ok(())
//! }
//! ```

// Domain modules
pub mod auth;
pub mod errors;
pub mod http;
pub mod server;

// Re-export auth types
pub use auth::{
    AuthError, Claims, Clock, JwtConfig, TokenAuthenticator, TokenIssuer, jwt_auth_middleware,
    system_clock,
};

// Re-export server types
pub use server::{
    DrainOutcome, HealthResponse, ShutdownCoordinator, health_response, serve_until_shutdown,
    trace_layer,
};

// Re-export HTTP middleware
pub use http::{api_cors_layer, default_json_content_type};

// Re-export error types
pub use errors::AppError;
