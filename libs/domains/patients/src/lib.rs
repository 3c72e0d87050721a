//! Patients Domain
//!
//! Patient records behind a store gateway that bounds every call by the
//! request timeout and refuses work once closed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Timeouts, close-once
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_patients::{
//!     handlers,
//!     repository::InMemoryPatientRepository,
//!     service::PatientService,
//! };
//!
//! let service = PatientService::new(InMemoryPatientRepository::new());
//! let router = handlers::router(service, 1 << 20);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{PatientError, PatientResult};
pub use handlers::ApiDoc;
pub use models::{CreatePatient, Patient};
pub use postgres::PgPatientRepository;
#[cfg(any(test, feature = "testing"))]
pub use repository::MockPatientRepository;
pub use repository::{InMemoryPatientRepository, PatientRepository};
pub use service::PatientService;
