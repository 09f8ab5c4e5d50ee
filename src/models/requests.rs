use crate::core::skills::SkillSet;
use crate::models::domain::AssignmentStatus;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Rejects strings that are empty once trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Request to rank events for a volunteer
///
/// The id is checked by the matching service rather than here, so a missing
/// id surfaces as the same validation error everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesRequest {
    #[serde(default, alias = "volunteer_id", rename = "volunteerId")]
    pub volunteer_id: String,
}

/// Request to assign a volunteer to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignVolunteerRequest {
    #[serde(default, alias = "volunteer_id", rename = "volunteerId")]
    pub volunteer_id: String,
    #[serde(default, alias = "event_id", rename = "eventId")]
    pub event_id: String,
}

/// Request to move an assignment through its lifecycle
///
/// `status` is one of `assigned`, `in_progress`, `completed`, `cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAssignmentStatusRequest {
    pub status: AssignmentStatus,
}

/// Request to create an event
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(default, alias = "event_name", rename = "eventName")]
    pub event_name: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub description: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub location: String,
    #[serde(default, alias = "required_skills", rename = "requiredSkills")]
    pub required_skills: SkillSet,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub urgency: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default, alias = "event_date", rename = "eventDate")]
    pub event_date: String,
}

/// Request to create or update a volunteer profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(default, alias = "full_name", rename = "fullName")]
    pub full_name: String,
    #[serde(default)]
    pub skills: SkillSet,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub address1: String,
    #[serde(default)]
    pub address2: Option<String>,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub city: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub state: String,
    #[validate(length(min = 5, max = 9))]
    #[serde(default, alias = "zipcode")]
    pub zip: String,
    #[serde(default)]
    pub preferences: Option<String>,
    #[validate(custom(function = "not_blank"))]
    #[serde(default, alias = "availability")]
    pub date: String,
}

/// Request to push a notification
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendNotificationRequest {
    #[validate(custom(function = "not_blank"))]
    #[serde(default, alias = "volunteerEmail")]
    pub recipient: String,
    #[validate(custom(function = "not_blank"))]
    #[serde(default)]
    pub message: String,
}

/// Query parameters for history endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(default, rename = "volunteerId")]
    pub volunteer_id: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
}

/// Query parameters for the notification feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub recipient: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_event_blank_fields_fail() {
        let req: CreateEventRequest = serde_json::from_str(
            r#"{"eventName": "  ", "description": "d", "location": "l",
                "requiredSkills": "a", "urgency": "high", "eventDate": "2025-01-01"}"#,
        )
        .unwrap();

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("event_name"));
    }

    #[test]
    fn test_profile_zip_length() {
        let mut req: UpdateProfileRequest = serde_json::from_str(
            r#"{"fullName": "John Doe", "skills": "coding", "address1": "123 Main St",
                "city": "Austin", "state": "TX", "zip": "78701", "date": "2023-10-15"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());

        req.zip = "787".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_assignment_status_request() {
        let req: UpdateAssignmentStatusRequest =
            serde_json::from_str(r#"{"status": "in_progress"}"#).unwrap();
        assert_eq!(req.status, AssignmentStatus::InProgress);

        assert!(serde_json::from_str::<UpdateAssignmentStatusRequest>(r#"{"status": "upcoming"}"#).is_err());
    }

    #[test]
    fn test_notification_accepts_volunteer_email_alias() {
        let req: SendNotificationRequest = serde_json::from_str(
            r#"{"volunteerEmail": "test@example.com", "message": "hello"}"#,
        )
        .unwrap();
        assert_eq!(req.recipient, "test@example.com");
        assert!(req.validate().is_ok());
    }
}
