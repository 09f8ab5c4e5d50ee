use crate::core::export::ReportPage;
use crate::models::domain::{Assignment, Event, HistoryRecord, MatchResult, Notification, Volunteer};
use serde::{Deserialize, Serialize};

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindMatchesResponse {
    pub success: bool,
    pub volunteer: Volunteer,
    pub matched_events: Vec<MatchResult>,
    pub total_events: usize,
}

/// Response for the assignment endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub success: bool,
    pub message: String,
    pub assignment: Assignment,
}

/// Response for event creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventCreatedResponse {
    pub message: String,
    pub event: Event,
}

/// Response for profile updates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileUpdatedResponse {
    pub message: String,
    pub profile: Volunteer,
}

/// Response for history listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub data: Vec<HistoryRecord>,
}

/// Response for the paginated report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub total_pages: usize,
    pub pages: Vec<ReportPage>,
}

/// Response for the notification feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for a sent notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSentResponse {
    pub message: String,
    pub notification: Notification,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
