use crate::core::skills::SkillSet;
use crate::models::{Address, Assignment, AssignmentStatus, Event, Notification, Urgency, Volunteer};
use crate::services::store::{
    AssignmentStore, EventStore, NotificationStore, Store, StoreError, VolunteerStore,
};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        StoreError::Postgres(PostgresError::SqlxError(value))
    }
}

/// Assignment status as stored in the `assignment_status` enum
#[derive(Debug, Clone, Copy, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "snake_case")]
pub enum StatusColumn {
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl From<AssignmentStatus> for StatusColumn {
    fn from(value: AssignmentStatus) -> Self {
        match value {
            AssignmentStatus::Assigned => StatusColumn::Assigned,
            AssignmentStatus::InProgress => StatusColumn::InProgress,
            AssignmentStatus::Completed => StatusColumn::Completed,
            AssignmentStatus::Cancelled => StatusColumn::Cancelled,
        }
    }
}

impl From<StatusColumn> for AssignmentStatus {
    fn from(value: StatusColumn) -> Self {
        match value {
            StatusColumn::Assigned => AssignmentStatus::Assigned,
            StatusColumn::InProgress => AssignmentStatus::InProgress,
            StatusColumn::Completed => AssignmentStatus::Completed,
            StatusColumn::Cancelled => AssignmentStatus::Cancelled,
        }
    }
}

/// PostgreSQL-backed store
///
/// Skills are persisted as their normalized comma-joined text and parsed back
/// on read. Assignments have no uniqueness constraint.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn volunteer_from_row(row: &PgRow) -> Result<Volunteer, sqlx::Error> {
    let skills: String = row.try_get("skills")?;
    let line1: Option<String> = row.try_get("address1")?;

    let address = match line1 {
        Some(line1) => Some(Address {
            line1,
            line2: row.try_get("address2")?,
            city: row.try_get::<Option<String>, _>("city")?.unwrap_or_default(),
            state: row.try_get::<Option<String>, _>("state")?.unwrap_or_default(),
            zipcode: row.try_get::<Option<String>, _>("zipcode")?.unwrap_or_default(),
        }),
        None => None,
    };

    Ok(Volunteer {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        skills: SkillSet::parse(&skills),
        preferences: row.try_get("preferences")?,
        address,
        availability: row.try_get("availability")?,
    })
}

fn event_from_row(row: &PgRow) -> Result<Event, sqlx::Error> {
    let skills: String = row.try_get("required_skills")?;
    let urgency: String = row.try_get("urgency")?;

    Ok(Event {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        location: row.try_get("location")?,
        required_skills: SkillSet::parse(&skills),
        urgency: Urgency::parse(&urgency),
        event_date: row.try_get("event_date")?,
    })
}

fn assignment_from_row(row: &PgRow) -> Result<Assignment, sqlx::Error> {
    let status: StatusColumn = row.try_get("status")?;

    Ok(Assignment {
        id: row.try_get("id")?,
        volunteer_id: row.try_get("volunteer_id")?,
        event_id: row.try_get("event_id")?,
        status: status.into(),
        assigned_at: row.try_get("assigned_at")?,
    })
}

fn notification_from_row(row: &PgRow) -> Result<Notification, sqlx::Error> {
    Ok(Notification {
        id: row.try_get("id")?,
        recipient: row.try_get("recipient")?,
        message: row.try_get("message")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl VolunteerStore for PostgresClient {
    async fn list_volunteers(&self) -> Result<Vec<Volunteer>, StoreError> {
        let query = r#"
            SELECT id, name, skills, preferences, address1, address2, city, state, zipcode, availability
            FROM volunteers
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(volunteer_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn get_volunteer(&self, id: &str) -> Result<Option<Volunteer>, StoreError> {
        let query = r#"
            SELECT id, name, skills, preferences, address1, address2, city, state, zipcode, availability
            FROM volunteers
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref()
            .map(volunteer_from_row)
            .transpose()
            .map_err(Into::into)
    }

    async fn upsert_volunteer(&self, volunteer: Volunteer) -> Result<Volunteer, StoreError> {
        let query = r#"
            INSERT INTO volunteers
                (id, name, skills, preferences, address1, address2, city, state, zipcode, availability)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                skills = EXCLUDED.skills,
                preferences = EXCLUDED.preferences,
                address1 = EXCLUDED.address1,
                address2 = EXCLUDED.address2,
                city = EXCLUDED.city,
                state = EXCLUDED.state,
                zipcode = EXCLUDED.zipcode,
                availability = EXCLUDED.availability
        "#;

        let address = volunteer.address.as_ref();

        sqlx::query(query)
            .bind(&volunteer.id)
            .bind(&volunteer.name)
            .bind(volunteer.skills.join(","))
            .bind(&volunteer.preferences)
            .bind(address.map(|a| a.line1.clone()))
            .bind(address.and_then(|a| a.line2.clone()))
            .bind(address.map(|a| a.city.clone()))
            .bind(address.map(|a| a.state.clone()))
            .bind(address.map(|a| a.zipcode.clone()))
            .bind(volunteer.availability)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted volunteer {}", volunteer.id);

        Ok(volunteer)
    }
}

#[async_trait]
impl EventStore for PostgresClient {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let query = r#"
            SELECT id, name, description, location, required_skills, urgency, event_date
            FROM events
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(event_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn get_event(&self, id: &str) -> Result<Option<Event>, StoreError> {
        let query = r#"
            SELECT id, name, description, location, required_skills, urgency, event_date
            FROM events
            WHERE id = $1
        "#;

        let row = sqlx::query(query).bind(id).fetch_optional(&self.pool).await?;

        row.as_ref().map(event_from_row).transpose().map_err(Into::into)
    }

    async fn insert_event(&self, event: Event) -> Result<Event, StoreError> {
        let query = r#"
            INSERT INTO events (id, name, description, location, required_skills, urgency, event_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#;

        sqlx::query(query)
            .bind(&event.id)
            .bind(&event.name)
            .bind(&event.description)
            .bind(&event.location)
            .bind(event.required_skills.join(","))
            .bind(event.urgency.label())
            .bind(event.event_date)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Inserted event {} ({})", event.id, event.name);

        Ok(event)
    }
}

#[async_trait]
impl AssignmentStore for PostgresClient {
    async fn insert_assignment(&self, assignment: Assignment) -> Result<Assignment, StoreError> {
        let query = r#"
            INSERT INTO assignments (id, volunteer_id, event_id, status, assigned_at)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(&assignment.id)
            .bind(&assignment.volunteer_id)
            .bind(&assignment.event_id)
            .bind(StatusColumn::from(assignment.status))
            .bind(assignment.assigned_at)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Recorded assignment: {} -> {} ({:?})",
            assignment.volunteer_id,
            assignment.event_id,
            assignment.status
        );

        Ok(assignment)
    }

    async fn list_assignments(&self) -> Result<Vec<Assignment>, StoreError> {
        let query = r#"
            SELECT id, volunteer_id, event_id, status, assigned_at
            FROM assignments
            ORDER BY assigned_at
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(assignment_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn assignments_for_volunteer(
        &self,
        volunteer_id: &str,
    ) -> Result<Vec<Assignment>, StoreError> {
        let query = r#"
            SELECT id, volunteer_id, event_id, status, assigned_at
            FROM assignments
            WHERE volunteer_id = $1
            ORDER BY assigned_at
        "#;

        let rows = sqlx::query(query)
            .bind(volunteer_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(assignment_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }

    async fn update_assignment_status(
        &self,
        id: &str,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>, StoreError> {
        let query = r#"
            UPDATE assignments
            SET status = $2
            WHERE id = $1
            RETURNING id, volunteer_id, event_id, status, assigned_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .bind(StatusColumn::from(status))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(assignment_from_row).transpose()?)
    }
}

#[async_trait]
impl NotificationStore for PostgresClient {
    async fn insert_notification(
        &self,
        notification: Notification,
    ) -> Result<Notification, StoreError> {
        let query = r#"
            INSERT INTO notifications (id, recipient, message, created_at)
            VALUES ($1, $2, $3, $4)
        "#;

        sqlx::query(query)
            .bind(&notification.id)
            .bind(&notification.recipient)
            .bind(&notification.message)
            .bind(notification.created_at)
            .execute(&self.pool)
            .await?;

        Ok(notification)
    }

    async fn list_notifications(
        &self,
        recipient: Option<&str>,
    ) -> Result<Vec<Notification>, StoreError> {
        let query = r#"
            SELECT id, recipient, message, created_at
            FROM notifications
            WHERE $1::TEXT IS NULL OR recipient = $1
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query).bind(recipient).fetch_all(&self.pool).await?;

        rows.iter()
            .map(notification_from_row)
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(Into::into)
    }
}

#[async_trait]
impl Store for PostgresClient {
    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
