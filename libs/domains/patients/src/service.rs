use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::error::{PatientError, PatientResult};
use crate::models::{CreatePatient, Patient};
use crate::repository::PatientRepository;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(3);

/// Gateway to the patient store.
///
/// Every operation is bounded by the request timeout and refused once
/// [`PatientService::close`] has been called. Clones share the repository
/// and the closed flag.
pub struct PatientService<R: PatientRepository> {
    repository: Arc<R>,
    request_timeout: Duration,
    closed: Arc<AtomicBool>,
}

impl<R: PatientRepository> Clone for PatientService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            request_timeout: self.request_timeout,
            closed: self.closed.clone(),
        }
    }
}

impl<R: PatientRepository> PatientService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        work: impl Future<Output = PatientResult<T>>,
    ) -> PatientResult<T> {
        if self.is_closed() {
            return Err(PatientError::Closed);
        }

        match tokio::time::timeout(self.request_timeout, work).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(operation, timeout = ?self.request_timeout, "Store operation timed out");
                Err(PatientError::Timeout(self.request_timeout))
            }
        }
    }

    /// Create a new patient
    pub async fn create_patient(&self, input: CreatePatient) -> PatientResult<Patient> {
        self.bounded("create_patient", self.repository.create(input))
            .await
    }

    /// Get a patient by ID
    pub async fn get_patient(&self, id: i32) -> PatientResult<Patient> {
        self.bounded("get_patient", self.repository.get_by_id(id))
            .await?
            .ok_or(PatientError::NotFound(id))
    }

    /// List all patients; an empty store yields an empty list
    pub async fn list_patients(&self) -> PatientResult<Vec<Patient>> {
        self.bounded("list_patients", self.repository.list()).await
    }

    /// Ping the store
    pub async fn check_health(&self) -> PatientResult<()> {
        self.bounded("check_health", self.repository.ping()).await
    }

    /// Close the store. The first call closes the repository; later calls
    /// are no-ops. All other operations fail with `Closed` afterwards.
    pub async fn close(&self) -> PatientResult<()> {
        if self
            .closed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(());
        }

        tracing::info!("Closing patient store");
        self.repository.close().await
    }
}
