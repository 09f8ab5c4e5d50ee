use crate::core::skills::SkillSet;
use crate::models::{Assignment, AssignmentStatus, Event, Notification, Urgency, Volunteer};
use crate::services::store::{
    AssignmentStore, EventStore, NotificationStore, Store, StoreError, VolunteerStore,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    volunteers: Vec<Volunteer>,
    events: Vec<Event>,
    assignments: Vec<Assignment>,
    notifications: Vec<Notification>,
}

/// Process-local store
///
/// Used for development and tests. Records keep insertion order, which is the
/// order the matcher and history builder see.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Collections>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(volunteers: Vec<Volunteer>, events: Vec<Event>) -> Self {
        Self {
            inner: RwLock::new(Collections {
                volunteers,
                events,
                ..Collections::default()
            }),
        }
    }

    /// Store preloaded with three volunteers and three events
    pub fn seeded() -> Self {
        let mut v1 = Volunteer::new("v1", "Volunteer Name", "deploy, code");
        v1.preferences = Some("night".to_string());
        let mut v2 = Volunteer::new("v2", "Jane Smith", "design, teaching");
        v2.preferences = Some("weekend".to_string());
        let mut v3 = Volunteer::new("v3", "Mike Johnson", "packing, driving");
        v3.preferences = Some("morning".to_string());

        let events = vec![
            demo_event("e1", "Blood Drive", "Saving lives", "Community Center", "packing, assisting", "high", (2025, 3, 15)),
            demo_event("e2", "Donation", "Donate", "Downtown", "packing, assisting", "medium", (2025, 3, 20)),
            demo_event("e3", "Code Workshop", "Teaching coding to kids", "Public Library", "code, teaching", "low", (2025, 3, 22)),
        ];

        Self::with_records(vec![v1, v2, v3], events)
    }
}

fn demo_event(
    id: &str,
    name: &str,
    description: &str,
    location: &str,
    skills: &str,
    urgency: &str,
    (year, month, day): (i32, u32, u32),
) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        location: location.to_string(),
        required_skills: SkillSet::parse(skills),
        urgency: Urgency::parse(urgency),
        event_date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}

#[async_trait]
impl VolunteerStore for InMemoryStore {
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StoreError> {
        Ok(self.inner.read().await.volunteers.clone())
    }

    async fn get_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.volunteers.iter().find(|v| v.id == id).cloned())
    }

    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<Volunteer, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.volunteers.iter_mut().find(|v| v.id == volunteer.id) {
            Some(existing) => *existing = volunteer.clone(),
            None => inner.volunteers.push(volunteer.clone()),
        }
        Ok(volunteer)
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.inner.read().await.events.clone())
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.events.iter().find(|e| e.id == id).cloned())
    }

    async fn insert_event(&self, event: Event) -> Result<Event, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.events.iter().any(|e| e.id == event.id) {
            return Err(StoreError::InvalidRecord(format!("duplicate event id {}", event.id)));
        }
        inner.events.push(event.clone());
        Ok(event)
    }
}

#[async_trait]
impl AssignmentStore for InMemoryStore {
    async fn insert_assignment(&self, assignment: Assignment) -> Result<Assignment, StoreError> {
        self.inner.write().await.assignments.push(assignment.clone());
        Ok(assignment)
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        Ok(self.inner.read().await.assignments.clone())
    }

    async fn assignments_for_volunteer(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .assignments
            .iter()
            .filter(|a| a.volunteer_id == volunteer_id)
            .cloned()
            .collect())
    }

    async fn update_assignment_status(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.assignments.iter_mut().find(|a| a.id == id).map(|assignment| {
            assignment.status = status;
            assignment.clone()
        }))
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, StoreError> {
        self.inner.write().await.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        recipient: Option<&str>,
    ) -> Result<Vec<Notification>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .notifications
            .iter()
            .filter(|n| recipient.map_or(true, |r| n.recipient == r))
            .cloned()
            .collect())
    }
}

impl Store for InMemoryStore {}
