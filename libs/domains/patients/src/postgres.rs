use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::PatientResult,
    models::{CreatePatient, Patient},
    repository::PatientRepository,
};

/// PostgreSQL-backed repository. Clones share one connection pool.
#[derive(Clone)]
pub struct PgPatientRepository {
    db: DatabaseConnection,
}

impl PgPatientRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PatientRepository for PgPatientRepository {
    async fn create(&self, input: CreatePatient) -> PatientResult<Patient> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(patient_id = model.id, "Created patient");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> PatientResult<Option<Patient>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> PatientResult<Vec<Patient>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> PatientResult<()> {
        self.db.ping().await?;
        Ok(())
    }

    async fn close(&self) -> PatientResult<()> {
        self.db.clone().close().await?;
        tracing::info!("PostgreSQL connection pool closed");
        Ok(())
    }
}
