//! Process lifecycle: connect to the store, serve, drain, close.
//!
//! ```text
//! Init → ConnectingStore → Serving → Draining → Closed
//! ```
//!
//! A shutdown signal during `ConnectingStore` aborts startup; during
//! `Serving` it starts the drain, bounded by the request timeout.

use std::fmt;
use std::io;

use axum_helpers::{DrainOutcome, ShutdownCoordinator, serve_until_shutdown, system_clock};
use database::DatabaseError;
use database::common::RetryConfig;
use database::postgres::{DatabaseConnection, connect_supervised, run_migrations};
use domain_patients::{PatientError, PatientRepository, PatientService, PgPatientRepository};
use migration::Migrator;
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::api;
use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecyclePhase {
    Init,
    ConnectingStore,
    Serving,
    Draining,
    Closed,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Init => "init",
            LifecyclePhase::ConnectingStore => "connecting_store",
            LifecyclePhase::Serving => "serving",
            LifecyclePhase::Draining => "draining",
            LifecyclePhase::Closed => "closed",
        };
        f.write_str(name)
    }
}

fn enter(phase: LifecyclePhase) {
    info!(%phase, "Lifecycle phase changed");
}

/// Failures of the server and of closing the store, reported together
#[derive(Debug, Error)]
#[error("{}", describe(.server, .close))]
pub struct ShutdownError {
    pub server: Option<io::Error>,
    pub close: Option<PatientError>,
}

fn describe(server: &Option<io::Error>, close: &Option<PatientError>) -> String {
    let mut parts = Vec::new();
    if let Some(e) = server {
        parts.push(format!("HTTP server shutdown error: {}", e));
    }
    if let Some(e) = close {
        parts.push(format!("database connection close error: {}", e));
    }
    parts.join("; ")
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Database startup failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Shutdown(#[from] ShutdownError),
}

/// Runs the service until a shutdown signal has been handled.
///
/// Blocks on the store connection before binding the listener, so the
/// process never accepts requests it cannot serve.
pub async fn run(config: Config, coordinator: ShutdownCoordinator) -> Result<(), LifecycleError> {
    enter(LifecyclePhase::Init);
    if config.jwt.uses_default_secret() {
        tracing::warn!("Using the built-in JWT signing key; set HTTP_JWT_SIGNING_KEY in production");
    }

    enter(LifecyclePhase::ConnectingStore);
    let db = connect_supervised(
        &config.database,
        &RetryConfig::default(),
        coordinator.cancelled(),
    )
    .await?;

    let service = PatientService::new(PgPatientRepository::new(db.clone()))
        .with_request_timeout(config.server.request_timeout);

    let listener = match prepare_listener(&config, &db).await {
        Ok(listener) => listener,
        Err(e) => return Err(release_after_failed_start(&service, e).await),
    };

    let router = api::routes(&config, service.clone(), system_clock());

    enter(LifecyclePhase::Serving);
    let served = serve_until_shutdown(
        listener,
        router,
        &coordinator,
        config.server.request_timeout,
    )
    .await;

    close_after_drain(served, &service).await?;
    Ok(())
}

async fn prepare_listener(
    config: &Config,
    db: &DatabaseConnection,
) -> Result<TcpListener, LifecycleError> {
    run_migrations::<Migrator>(db, config.app.name).await?;

    let address = config.server.address();
    TcpListener::bind(&address)
        .await
        .map_err(|source| LifecycleError::Bind { address, source })
}

/// Closes the store after startup failed past the connection, keeping the
/// startup error as the one reported.
pub async fn release_after_failed_start<R: PatientRepository>(
    service: &PatientService<R>,
    error: LifecycleError,
) -> LifecycleError {
    if let Err(e) = service.close().await {
        tracing::error!(error = %e, "Failed to close the store after startup failure");
    }
    enter(LifecyclePhase::Closed);
    error
}

/// Finishes the drain and closes the store, whatever the server returned.
pub async fn close_after_drain<R: PatientRepository>(
    served: io::Result<DrainOutcome>,
    service: &PatientService<R>,
) -> Result<(), ShutdownError> {
    enter(LifecyclePhase::Draining);
    let server = match served {
        Ok(DrainOutcome::Clean) => None,
        Ok(DrainOutcome::TimedOut) => {
            tracing::warn!("Drain timed out, closing the store with requests in flight");
            None
        }
        Err(e) => Some(e),
    };

    let close = service.close().await.err();
    enter(LifecyclePhase::Closed);

    if server.is_none() && close.is_none() {
        info!("Shutdown complete");
        return Ok(());
    }

    Err(ShutdownError { server, close })
}
