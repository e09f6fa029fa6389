//! The record-store seam used by the synchronizer, and its PostgreSQL
//! implementation.

use async_trait::async_trait;
use chrono::Utc;
use rdvtrack_core::time_window;
use rdvtrack_core::types::DbId;
use rdvtrack_db::models::appointment::CreateAppointment;
use rdvtrack_db::models::project::CreateProject;
use rdvtrack_db::repositories::{AppointmentRepo, ProjectRepo};
use rdvtrack_db::DbPool;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Backend(String),
}

/// The reads and writes a synchronization run performs. Each call is
/// committed on its own; no transaction spans several items.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Project id by exact name.
    async fn find_project_by_name(&self, name: &str) -> Result<Option<DbId>, StoreError>;

    /// Project id by the vendor program id recorded at catalog sync.
    async fn find_project_by_program_id(
        &self,
        program_id: &str,
    ) -> Result<Option<DbId>, StoreError>;

    /// Bump the project's `updated_at`, recording `program_id` if it has none.
    async fn touch_project(&self, id: DbId, program_id: Option<&str>) -> Result<(), StoreError>;

    async fn create_project(&self, input: &CreateProject) -> Result<DbId, StoreError>;

    async fn appointment_exists(&self, action_id: &str) -> Result<bool, StoreError>;

    /// Insert an appointment and refresh its project's remaining balance.
    async fn create_appointment(&self, input: &CreateAppointment) -> Result<DbId, StoreError>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`RecordStore`] over the sqlx repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn find_project_by_name(&self, name: &str) -> Result<Option<DbId>, StoreError> {
        Ok(ProjectRepo::find_by_name(&self.pool, name)
            .await?
            .map(|p| p.id))
    }

    async fn find_project_by_program_id(
        &self,
        program_id: &str,
    ) -> Result<Option<DbId>, StoreError> {
        Ok(ProjectRepo::find_by_external_program_id(&self.pool, program_id)
            .await?
            .map(|p| p.id))
    }

    async fn touch_project(&self, id: DbId, program_id: Option<&str>) -> Result<(), StoreError> {
        if ProjectRepo::touch(&self.pool, id, program_id).await? {
            Ok(())
        } else {
            Err(StoreError::Backend(format!("Project {id} vanished during sync")))
        }
    }

    async fn create_project(&self, input: &CreateProject) -> Result<DbId, StoreError> {
        Ok(ProjectRepo::create(&self.pool, input).await?.id)
    }

    async fn appointment_exists(&self, action_id: &str) -> Result<bool, StoreError> {
        Ok(AppointmentRepo::find_by_action_id(&self.pool, action_id)
            .await?
            .is_some())
    }

    /// The appointment counts as stored once inserted. A failed balance
    /// refresh is logged; the next write to the project recomputes it.
    async fn create_appointment(&self, input: &CreateAppointment) -> Result<DbId, StoreError> {
        let appointment = AppointmentRepo::create(&self.pool, input).await?;
        let month = time_window::month_to_date(Utc::now());
        if let Err(e) =
            ProjectRepo::refresh_remaining_balance(&self.pool, appointment.project_id, month).await
        {
            tracing::warn!(
                project_id = appointment.project_id,
                appointment_id = appointment.id,
                error = %e,
                "Remaining balance refresh failed after import",
            );
        }
        Ok(appointment.id)
    }
}
