use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::PatientResult;
use crate::models::{CreatePatient, Patient};

/// Repository trait for Patient persistence
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Insert a new patient, returning the stored record
    async fn create(&self, input: CreatePatient) -> PatientResult<Patient>;

    /// Get a patient by ID
    async fn get_by_id(&self, id: i32) -> PatientResult<Option<Patient>>;

    /// List all patients ordered by ID
    async fn list(&self) -> PatientResult<Vec<Patient>>;

    /// Round trip to the store without touching data
    async fn ping(&self) -> PatientResult<()>;

    /// Release the underlying connections
    async fn close(&self) -> PatientResult<()>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    patients: BTreeMap<i32, Patient>,
}

/// In-memory implementation of PatientRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryPatientRepository {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn create(&self, input: CreatePatient) -> PatientResult<Patient> {
        let mut state = self.state.write().await;
        state.next_id += 1;

        let patient = Patient::new(state.next_id, input);
        state.patients.insert(patient.id, patient.clone());

        tracing::info!(patient_id = patient.id, "Created patient");
        Ok(patient)
    }

    async fn get_by_id(&self, id: i32) -> PatientResult<Option<Patient>> {
        let state = self.state.read().await;
        Ok(state.patients.get(&id).cloned())
    }

    async fn list(&self) -> PatientResult<Vec<Patient>> {
        let state = self.state.read().await;
        Ok(state.patients.values().cloned().collect())
    }

    async fn ping(&self) -> PatientResult<()> {
        Ok(())
    }

    async fn close(&self) -> PatientResult<()> {
        Ok(())
    }
}
