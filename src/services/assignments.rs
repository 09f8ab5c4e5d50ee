use crate::models::{Assignment, AssignmentStatus};
use crate::services::store::{AssignmentStore, StoreError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur when recording an assignment
#[derive(Debug, Error)]
pub enum AssignmentError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Assignment not found: {0}")]
    NotFound(String),

    #[error("Volunteer {volunteer_id} is already assigned to event {event_id}")]
    AlreadyAssigned {
        volunteer_id: String,
        event_id: String,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How repeated assignments of the same pair are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Every call appends a new record
    #[default]
    Allow,
    /// A second assignment of the same volunteer to the same event fails.
    /// The check and the insert are separate store calls.
    RejectPair,
}

/// Records accepted (volunteer, event) pairings
pub struct AssignmentRecorder<S: ?Sized> {
    store: Arc<S>,
    policy: DuplicatePolicy,
}

impl<S: ?Sized> Clone for AssignmentRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy,
        }
    }
}

impl<S: AssignmentStore + ?Sized> AssignmentRecorder<S> {
    pub fn new(store: Arc<S>, policy: DuplicatePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Record a new assignment with status `assigned`
    ///
    /// Both ids must be non-blank. Previously computed match scores are not
    /// touched; re-run the matcher to see the prior-assignment bonus.
    pub async fn assign(
        &self,
        volunteer_id: &str,
        event_id: &str,
    ) -> Result<Assignment, AssignmentError> {
        let volunteer_id = volunteer_id.trim();
        let event_id = event_id.trim();

        if volunteer_id.is_empty() || event_id.is_empty() {
            return Err(AssignmentError::Validation(
                "Both volunteerId and eventId are required".to_string(),
            ));
        }

        if self.policy == DuplicatePolicy::RejectPair {
            let existing = self.store.assignments_for_volunteer(volunteer_id).await?;
            if existing
                .iter()
                .any(|a| a.event_id == event_id && a.status != AssignmentStatus::Cancelled)
            {
                tracing::info!(
                    "Rejecting duplicate assignment: {} -> {}",
                    volunteer_id,
                    event_id
                );
                return Err(AssignmentError::AlreadyAssigned {
                    volunteer_id: volunteer_id.to_string(),
                    event_id: event_id.to_string(),
                });
            }
        }

        let assignment = self
            .store
            .insert_assignment(Assignment::new(volunteer_id, event_id))
            .await?;

        tracing::info!(
            "Assigned volunteer {} to event {} ({})",
            assignment.volunteer_id,
            assignment.event_id,
            assignment.id
        );

        Ok(assignment)
    }

    /// Move an assignment to a new lifecycle status
    pub async fn update_status(
        &self,
        assignment_id: &str,
        status: AssignmentStatus,
    ) -> Result<Assignment, AssignmentError> {
        let assignment_id = assignment_id.trim();
        if assignment_id.is_empty() {
            return Err(AssignmentError::Validation("Assignment ID is required".to_string()));
        }

        let assignment = self
            .store
            .update_assignment_status(assignment_id, status)
            .await?
            .ok_or_else(|| AssignmentError::NotFound(assignment_id.to_string()))?;

        tracing::info!("Assignment {} is now {}", assignment.id, status.label());

        Ok(assignment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::InMemoryStore;

    #[tokio::test]
    async fn test_assign_records_with_status() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AssignmentRecorder::new(store.clone(), DuplicatePolicy::Allow);

        let assignment = recorder.assign("v1", "e1").await.unwrap();

        assert_eq!(assignment.status, AssignmentStatus::Assigned);
        assert_eq!(store.list_assignments().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_assign_rejects_blank_ids() {
        let recorder = AssignmentRecorder::new(Arc::new(InMemoryStore::new()), DuplicatePolicy::Allow);

        assert!(matches!(recorder.assign("", "e1").await, Err(AssignmentError::Validation(_))));
        assert!(matches!(recorder.assign("v1", "   ").await, Err(AssignmentError::Validation(_))));
    }

    #[tokio::test]
    async fn test_allow_policy_keeps_duplicates() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AssignmentRecorder::new(store.clone(), DuplicatePolicy::Allow);

        recorder.assign("v1", "e1").await.unwrap();
        recorder.assign("v1", "e1").await.unwrap();

        assert_eq!(store.list_assignments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reject_pair_policy() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AssignmentRecorder::new(store.clone(), DuplicatePolicy::RejectPair);

        recorder.assign("v1", "e1").await.unwrap();
        let second = recorder.assign("v1", "e1").await;
        // A different volunteer on the same event is still allowed
        recorder.assign("v2", "e1").await.unwrap();

        assert!(matches!(second, Err(AssignmentError::AlreadyAssigned { .. })));
        assert_eq!(store.list_assignments().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_status() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AssignmentRecorder::new(store.clone(), DuplicatePolicy::Allow);
        let assignment = recorder.assign("v1", "e1").await.unwrap();

        let updated = recorder
            .update_status(&assignment.id, AssignmentStatus::InProgress)
            .await
            .unwrap();

        assert_eq!(updated.id, assignment.id);
        assert_eq!(updated.status, AssignmentStatus::InProgress);
        assert!(matches!(
            recorder.update_status("missing", AssignmentStatus::Completed).await,
            Err(AssignmentError::NotFound(_))
        ));
        assert!(matches!(
            recorder.update_status(" ", AssignmentStatus::Completed).await,
            Err(AssignmentError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_reject_pair_ignores_cancelled() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AssignmentRecorder::new(store.clone(), DuplicatePolicy::RejectPair);

        let first = recorder.assign("v1", "e1").await.unwrap();
        recorder.update_status(&first.id, AssignmentStatus::Cancelled).await.unwrap();

        assert!(recorder.assign("v1", "e1").await.is_ok());
    }
}
