// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Address, Assignment, AssignmentStatus, Event, HistoryRecord, MatchResult, Notification,
    ScoreBreakdown, ScoringWeights, Urgency, Volunteer,
};
pub use requests::{
    AssignVolunteerRequest, CreateEventRequest, FindMatchesRequest, HistoryQuery,
    NotificationQuery, SendNotificationRequest, UpdateAssignmentStatusRequest, UpdateProfileRequest,
};
pub use responses::{
    AssignmentResponse, ErrorResponse, EventCreatedResponse, FindMatchesResponse, HealthResponse,
    HistoryResponse, NotificationSentResponse, NotificationsResponse, ProfileUpdatedResponse,
    ReportResponse,
};
