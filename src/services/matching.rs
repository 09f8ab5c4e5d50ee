use crate::core::{AssignedEvents, Matcher};
use crate::models::{MatchResult, Volunteer};
use crate::services::store::{AssignmentStore, EventStore, StoreError, VolunteerStore};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while matching a volunteer
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Volunteer not found: {0}")]
    VolunteerNotFound(String),

    #[error("Lookup failed: {0}")]
    Lookup(#[from] StoreError),
}

/// Ranked events for one volunteer
#[derive(Debug)]
pub struct VolunteerMatches {
    pub volunteer: Volunteer,
    pub matches: Vec<MatchResult>,
}

/// Looks up the inputs of the matcher and runs it
///
/// Lookups are awaited one after another. If any of them fails the matcher
/// is not entered and the failure is returned as `MatchingError::Lookup`.
pub struct MatchingService<S: ?Sized> {
    store: Arc<S>,
    matcher: Matcher,
}

impl<S: ?Sized> Clone for MatchingService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            matcher: self.matcher.clone(),
        }
    }
}

impl<S> MatchingService<S>
where
    S: VolunteerStore + EventStore + AssignmentStore + ?Sized,
{
    pub fn new(store: Arc<S>, matcher: Matcher) -> Self {
        Self { store, matcher }
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub async fn find_matches(&self, volunteer_id: &str) -> Result<VolunteerMatches, MatchingError> {
        let volunteer_id = volunteer_id.trim();
        if volunteer_id.is_empty() {
            return Err(MatchingError::Validation("Volunteer ID is required".to_string()));
        }

        let volunteer = self
            .store
            .get_volunteer(volunteer_id)
            .await?
            .ok_or_else(|| MatchingError::VolunteerNotFound(volunteer_id.to_string()))?;

        let events = self.store.list_events().await?;
        let assignments = self.store.assignments_for_volunteer(volunteer_id).await?;
        let assigned = AssignedEvents::from_assignments(&assignments);

        tracing::debug!(
            "Matching volunteer {} against {} events ({} prior assignments)",
            volunteer_id,
            events.len(),
            assigned.len()
        );

        let matches = self.matcher.match_events(&volunteer, &events, &assigned);

        Ok(VolunteerMatches { volunteer, matches })
    }
}
