use crate::core::to_csv;
use crate::models::{CreateEventRequest, Event, EventCreatedResponse, Urgency};
use crate::routes::{bad_request, internal_error, AppState};
use crate::services::EventStore;
use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use validator::Validate;

/// Configure event management routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/events", web::get().to(list_events))
        .route("/events", web::post().to(create_event))
        .route("/events/export.csv", web::get().to(export_events));
}

async fn list_events(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_events().await {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(e) => internal_error("Failed to fetch events", e),
    }
}

/// Create event endpoint
///
/// POST /api/v1/events
///
/// Request body:
/// ```json
/// {
///   "eventName": "string",
///   "description": "string",
///   "location": "string",
///   "requiredSkills": "comma, separated" | ["list"],
///   "urgency": "low|medium|high|critical",
///   "eventDate": "YYYY-MM-DD"
/// }
/// ```
async fn create_event(
    state: web::Data<AppState>,
    req: web::Json<CreateEventRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_event request: {:?}", errors);
        return bad_request("All required fields must be filled", errors.to_string());
    }

    if req.required_skills.is_empty() {
        return bad_request("All required fields must be filled", "requiredSkills: at least one skill is required");
    }

    let event_date = match NaiveDate::parse_from_str(req.event_date.trim(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => return bad_request("Invalid date", format!("eventDate must be YYYY-MM-DD: {}", e)),
    };

    let req = req.into_inner();
    let event = Event {
        id: uuid::Uuid::new_v4().to_string(),
        name: req.event_name.trim().to_string(),
        description: req.description.trim().to_string(),
        location: req.location.trim().to_string(),
        required_skills: req.required_skills,
        urgency: Urgency::parse(&req.urgency),
        event_date,
    };

    match state.store.insert_event(event).await {
        Ok(event) => {
            tracing::info!("Created event {} ({})", event.id, event.name);
            HttpResponse::Created().json(EventCreatedResponse {
                message: "Event created successfully".to_string(),
                event,
            })
        }
        Err(e) => internal_error("Failed to create event", e),
    }
}

async fn export_events(state: web::Data<AppState>) -> impl Responder {
    let events = match state.store.list_events().await {
        Ok(events) => events,
        Err(e) => return internal_error("Failed to fetch events", e),
    };

    match to_csv(&events) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"events.csv\""))
            .body(body),
        Err(e) => internal_error("Failed to export events", e),
    }
}
