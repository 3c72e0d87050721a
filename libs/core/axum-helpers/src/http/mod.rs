//! HTTP middleware module.
//!
//! This module provides HTTP-level middleware for:
//! - CORS with preflight short-circuiting
//! - A default JSON content type
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::http::{api_cors_layer, default_json_content_type};
//!
//! let app = Router::new()
//!     .nest("/api/v1", api_routes.layer(api_cors_layer()))
//!     .layer(axum::middleware::from_fn(default_json_content_type));
//! ```

pub mod content_type;
pub mod cors;

// Re-export commonly used functions
pub use content_type::default_json_content_type;
pub use cors::api_cors_layer;
