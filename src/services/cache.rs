use crate::models::{Assignment, AssignmentStatus, Event, Notification, Volunteer};
use crate::services::store::{
    AssignmentStore, EventStore, NotificationStore, Store, StoreError, VolunteerStore,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

const CATALOG_KEY: &str = "events:all";

/// Store decorator that caches the event catalog
///
/// Only the full event list is cached; it is invalidated whenever an event is
/// inserted through this decorator. Assignments are always read through, so
/// the prior-assignment bonus never sees stale data.
pub struct CachedStore<S: ?Sized> {
    inner: Arc<S>,
    catalog: moka::future::Cache<&'static str, Arc<Vec<Event>>>,
}

impl<S: Store + ?Sized> CachedStore<S> {
    pub fn new(inner: Arc<S>, ttl_secs: u64) -> Self {
        let catalog = moka::future::CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, catalog }
    }

    pub async fn invalidate(&self) {
        self.catalog.invalidate(CATALOG_KEY).await;
    }
}

#[async_trait]
impl<S: Store + ?Sized> VolunteerStore for CachedStore<S> {
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StoreError> {
        self.inner.list_volunteers().await
    }

    async fn get_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError> {
        self.inner.get_volunteer(id).await
    }

    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<Volunteer, StoreError> {
        self.inner.upsert_volunteer(volunteer).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> EventStore for CachedStore<S> {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        if let Some(events) = self.catalog.get(CATALOG_KEY).await {
            tracing::trace!("Event catalog cache hit");
            return Ok(events.as_ref().clone());
        }

        let events = Arc::new(self.inner.list_events().await?);
        self.catalog.insert(CATALOG_KEY, events.clone()).await;
        tracing::trace!("Event catalog cached ({} events)", events.len());

        Ok(events.as_ref().clone())
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        self.inner.get_event(id).await
    }

    async fn insert_event(&self, event: Event) -> Result<Event, StoreError> {
        let event = self.inner.insert_event(event).await?;
        self.invalidate().await;
        Ok(event)
    }
}

#[async_trait]
impl<S: Store + ?Sized> AssignmentStore for CachedStore<S> {
    async fn insert_assignment(&self, assignment: Assignment) -> Result<Assignment, StoreError> {
        self.inner.insert_assignment(assignment).await
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        self.inner.list_assignments().await
    }

    async fn assignments_for_volunteer(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        self.inner.assignments_for_volunteer(volunteer_id).await
    }

    async fn update_assignment_status(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>, StoreError> {
        self.inner.update_assignment_status(id, status).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> NotificationStore for CachedStore<S> {
    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, StoreError> {
        self.inner.insert_notification(notification).await
    }

    async fn list_notifications(
        &self,
        recipient: Option<&str>,
    ) -> Result<Vec<Notification>, StoreError> {
        self.inner.list_notifications(recipient).await
    }
}

#[async_trait]
impl<S: Store + ?Sized> Store for CachedStore<S> {
    async fn health_check(&self) -> Result<bool, StoreError> {
        self.inner.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skills::SkillSet;
    use crate::models::Urgency;
    use crate::services::memory::InMemoryStore;
    use chrono::NaiveDate;

    fn create_event(id: &str) -> Event {
        Event {
            id: id.to_string(),
            name: "Park Cleanup".to_string(),
            description: "River trash pickup".to_string(),
            location: "Riverside".to_string(),
            required_skills: SkillSet::parse("cleaning"),
            urgency: Urgency::Medium,
            event_date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_catalog_is_cached_until_insert() {
        let inner = Arc::new(InMemoryStore::seeded());
        let cached = CachedStore::new(inner.clone(), 300);

        assert_eq!(cached.list_events().await.unwrap().len(), 3);

        // Bypass the decorator: the cached catalog stays stale
        inner.insert_event(create_event("direct")).await.unwrap();
        assert_eq!(cached.list_events().await.unwrap().len(), 3);

        // Through the decorator: invalidated and reloaded
        cached.insert_event(create_event("cached")).await.unwrap();
        assert_eq!(cached.list_events().await.unwrap().len(), 5);
    }
}
