use sea_orm::DatabaseConnection;
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health
///
/// Pings the pool to verify the database connection is working.
///
/// # Returns
/// * `Ok(())` if the database is healthy
/// * `Err(DatabaseError::HealthCheckFailed)` if the ping fails
pub async fn check_health(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    db.ping().await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_check_health_on_mock_connection() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        assert!(check_health(&db).await.is_ok());
    }
}
