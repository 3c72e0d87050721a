//! Ferrum: patient records over HTTP.
//!
//! The binary in `main.rs` loads [`config::Config`], installs tracing and
//! hands over to [`lifecycle::run`]. The router itself is built by
//! [`api::routes`] and can be driven directly in tests with any
//! [`domain_patients::PatientRepository`].

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod openapi;
