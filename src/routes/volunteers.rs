use crate::models::{Address, ErrorResponse, ProfileUpdatedResponse, UpdateProfileRequest, Volunteer};
use crate::routes::{bad_request, internal_error, AppState};
use crate::services::VolunteerStore;
use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use validator::Validate;

/// Configure volunteer profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/volunteers", web::get().to(list_volunteers))
        .route("/volunteers/{id}", web::get().to(get_volunteer))
        .route("/volunteers/{id}", web::put().to(update_profile));
}

async fn list_volunteers(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_volunteers().await {
        Ok(volunteers) => HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "volunteers": volunteers,
        })),
        Err(e) => internal_error("Failed to fetch volunteers", e),
    }
}

async fn get_volunteer(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.store.get_volunteer(&id).await {
        Ok(Some(volunteer)) => HttpResponse::Ok().json(volunteer),
        Ok(None) => HttpResponse::NotFound().json(ErrorResponse::new(
            "Volunteer not found",
            format!("No volunteer with id {}", id),
            404,
        )),
        Err(e) => internal_error("Failed to fetch volunteer", e),
    }
}

/// Update profile endpoint
///
/// PUT /api/v1/volunteers/{id}
///
/// Creates the volunteer when the id is unknown.
async fn update_profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for profile update: {:?}", errors);
        return bad_request("All required fields must be filled", errors.to_string());
    }

    if req.skills.is_empty() {
        return bad_request("All required fields must be filled", "skills: at least one skill is required");
    }

    let availability = match NaiveDate::parse_from_str(req.date.trim(), "%Y-%m-%d") {
        Ok(date) => date,
        Err(e) => return bad_request("Invalid date", format!("date must be YYYY-MM-DD: {}", e)),
    };

    let req = req.into_inner();
    let volunteer = Volunteer {
        id: path.into_inner(),
        name: req.full_name.trim().to_string(),
        skills: req.skills,
        preferences: req.preferences.filter(|p| !p.trim().is_empty()),
        address: Some(Address {
            line1: req.address1,
            line2: req.address2.filter(|line| !line.trim().is_empty()),
            city: req.city,
            state: req.state,
            zipcode: req.zip,
        }),
        availability: Some(availability),
    };

    match state.store.upsert_volunteer(volunteer).await {
        Ok(profile) => {
            tracing::info!("Updated profile for volunteer {}", profile.id);
            HttpResponse::Ok().json(ProfileUpdatedResponse {
                message: "Profile updated successfully".to_string(),
                profile,
            })
        }
        Err(e) => internal_error("Failed to update profile", e),
    }
}
