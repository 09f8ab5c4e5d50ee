use crate::models::{
    AssignVolunteerRequest, AssignmentResponse, ErrorResponse, FindMatchesRequest,
    FindMatchesResponse, HealthResponse, Notification, UpdateAssignmentStatusRequest,
};
use crate::routes::{bad_request, internal_error, AppState};
use crate::services::{AssignmentError, EventStore, MatchingError, NotificationStore, Store};
use actix_web::{web, HttpResponse, Responder};

/// Configure health, matching and assignment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/assignments", web::post().to(assign_volunteer))
        .route("/assignments/{id}", web::patch().to(update_assignment_status));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// { "volunteerId": "string" }
/// ```
///
/// Every event is returned, ranked by score.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    tracing::info!("Finding matches for volunteer: {}", req.volunteer_id);

    match state.matching.find_matches(&req.volunteer_id).await {
        Ok(result) => {
            tracing::info!(
                "Returning {} ranked events for volunteer {}",
                result.matches.len(),
                result.volunteer.id
            );

            HttpResponse::Ok().json(FindMatchesResponse {
                success: true,
                total_events: result.matches.len(),
                volunteer: result.volunteer,
                matched_events: result.matches,
            })
        }
        Err(MatchingError::Validation(message)) => bad_request("Validation failed", message),
        Err(MatchingError::VolunteerNotFound(id)) => {
            HttpResponse::NotFound().json(ErrorResponse::new(
                "Volunteer not found",
                format!("No volunteer with id {}", id),
                404,
            ))
        }
        Err(MatchingError::Lookup(e)) => {
            tracing::error!("Lookup failed while matching {}: {}", req.volunteer_id, e);
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                "Lookup failed",
                e.to_string(),
                503,
            ))
        }
    }
}

/// Assign volunteer endpoint
///
/// POST /api/v1/assignments
///
/// Request body:
/// ```json
/// { "volunteerId": "string", "eventId": "string" }
/// ```
async fn assign_volunteer(
    state: web::Data<AppState>,
    req: web::Json<AssignVolunteerRequest>,
) -> impl Responder {
    let assignment = match state.recorder.assign(&req.volunteer_id, &req.event_id).await {
        Ok(assignment) => assignment,
        Err(AssignmentError::Validation(message)) => {
            return bad_request("Validation failed", message);
        }
        Err(e @ AssignmentError::AlreadyAssigned { .. }) => {
            return HttpResponse::Conflict().json(ErrorResponse::new(
                "Already assigned",
                e.to_string(),
                409,
            ));
        }
        Err(AssignmentError::Store(e)) => {
            return internal_error("Failed to assign volunteer", e);
        }
        Err(e @ AssignmentError::NotFound(_)) => {
            return internal_error("Failed to assign volunteer", e);
        }
    };

    // Notify the volunteer (best-effort)
    match state.store.get_event(&assignment.event_id).await {
        Ok(Some(event)) => {
            let notification = Notification::new(
                assignment.volunteer_id.clone(),
                format!("You've been assigned to an event: {}", event.name),
            );
            if let Err(e) = state.store.insert_notification(notification).await {
                tracing::warn!("Assignment recorded but notification failed: {}", e);
            }
        }
        Ok(None) => {
            tracing::warn!("Assignment {} references unknown event {}", assignment.id, assignment.event_id);
        }
        Err(e) => {
            tracing::warn!("Assignment recorded but event lookup for notification failed: {}", e);
        }
    }

    HttpResponse::Ok().json(AssignmentResponse {
        success: true,
        message: "Volunteer successfully assigned to event".to_string(),
        assignment,
    })
}

/// Update assignment status endpoint
///
/// PATCH /api/v1/assignments/{id}
///
/// Request body:
/// ```json
/// { "status": "assigned|in_progress|completed|cancelled" }
/// ```
async fn update_assignment_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateAssignmentStatusRequest>,
) -> impl Responder {
    match state.recorder.update_status(&path, req.status).await {
        Ok(assignment) => HttpResponse::Ok().json(AssignmentResponse {
            success: true,
            message: format!("Assignment status updated to {}", assignment.status.label()),
            assignment,
        }),
        Err(AssignmentError::Validation(message)) => bad_request("Validation failed", message),
        Err(e @ AssignmentError::NotFound(_)) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Assignment not found",
            e.to_string(),
            404,
        )),
        Err(e @ AssignmentError::AlreadyAssigned { .. }) => {
            internal_error("Failed to update assignment", e)
        }
        Err(AssignmentError::Store(e)) => internal_error("Failed to update assignment", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
