//! Server infrastructure module.
//!
//! This module provides:
//! - Serving with a bounded graceful drain
//! - Health response shaping
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{ShutdownCoordinator, serve_until_shutdown, trace_layer};
//!
//! let coordinator = ShutdownCoordinator::new();
//! coordinator.listen_for_signals();
//!
//! let app = trace_layer(router);
//! let outcome = serve_until_shutdown(listener, app, &coordinator, drain_timeout).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{DrainOutcome, serve_until_shutdown, trace_layer};
pub use health::{HealthResponse, health_response};
pub use shutdown::ShutdownCoordinator;
