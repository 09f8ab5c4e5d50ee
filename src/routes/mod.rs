// Route exports
pub mod events;
pub mod history;
pub mod matches;
pub mod notifications;
pub mod volunteers;

use crate::core::{Matcher, ReportLayout};
use crate::models::ErrorResponse;
use crate::services::{AssignmentRecorder, DuplicatePolicy, MatchingService, Store};
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub matching: MatchingService<dyn Store>,
    pub recorder: AssignmentRecorder<dyn Store>,
    pub report_layout: ReportLayout,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        matcher: Matcher,
        policy: DuplicatePolicy,
        report_layout: ReportLayout,
    ) -> Self {
        Self {
            matching: MatchingService::new(store.clone(), matcher),
            recorder: AssignmentRecorder::new(store.clone(), policy),
            store,
            report_layout,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(volunteers::configure)
            .configure(events::configure)
            .configure(history::configure)
            .configure(notifications::configure),
    );
}

pub(crate) fn bad_request(error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(error, message, 400))
}

pub(crate) fn internal_error(error: &str, err: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}: {}", error, err);
    HttpResponse::InternalServerError().json(ErrorResponse::new(error, err.to_string(), 500))
}

/// Request payload that failed to deserialize
///
/// Renders as the same `ErrorResponse` body the handlers use.
#[derive(Debug)]
pub struct PayloadError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for PayloadError {}

impl error::ResponseError for PayloadError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST);
        HttpResponse::build(status).json(ErrorResponse::new(
            self.error.as_str(),
            self.message.as_str(),
            self.status_code,
        ))
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    PayloadError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    PayloadError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}
