use crate::models::{Assignment, AssignmentStatus, Event, Notification, Volunteer};
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by any store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error(transparent)]
    Postgres(#[from] crate::services::postgres::PostgresError),
}

/// Source of volunteer profiles
#[async_trait]
pub trait VolunteerStore: Send + Sync {
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StoreError>;
    async fn get_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError>;
    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<Volunteer, StoreError>;
}

/// Source of events
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;
    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError>;
    async fn insert_event(&self, event: Event) -> Result<Event, StoreError>;
}

/// Append-only record of assignments
///
/// No uniqueness is enforced here; duplicate handling is the recorder's
/// policy.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    async fn insert_assignment(&self, assignment: Assignment) -> Result<Assignment, StoreError>;
    async fn list_assignments(&self) -> Result<Vec<Assignment>, StoreError>;
    async fn assignments_for_volunteer(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<Assignment>, StoreError>;
    /// Returns `None` when no assignment has this id
    async fn update_assignment_status(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>, StoreError>;
}

/// Notification feed
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, StoreError>;
    async fn list_notifications(
        &self,
        recipient: Option<&str>,
    ) -> Result<Vec<Notification>, StoreError>;
}

/// Every store capability, plus a liveness check
#[async_trait]
pub trait Store: VolunteerStore + EventStore + AssignmentStore + NotificationStore {
    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
