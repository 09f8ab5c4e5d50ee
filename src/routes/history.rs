use crate::core::{build_history, render_pages, to_csv, to_report_pages};
use crate::models::{HistoryQuery, HistoryRecord, HistoryResponse, ReportResponse};
use crate::routes::{internal_error, AppState};
use crate::services::{AssignmentStore, EventStore, StoreError, VolunteerStore};
use actix_web::{web, HttpResponse, Responder};

/// Configure volunteer history routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/history", web::get().to(list_history))
        .route("/history/export.csv", web::get().to(export_history_csv))
        .route("/history/report", web::get().to(history_report));
}

/// Gather history records, optionally for a single volunteer
async fn load_history(
    state: &AppState,
    volunteer_id: Option<&str>,
) -> Result<Vec<HistoryRecord>, StoreError> {
    let volunteers = state.store.list_volunteers().await?;
    let events = state.store.list_events().await?;
    let assignments = match volunteer_id {
        Some(id) => state.store.assignments_for_volunteer(id).await?,
        None => state.store.list_assignments().await?,
    };

    Ok(build_history(&volunteers, &events, &assignments))
}

fn volunteer_filter(query: &HistoryQuery) -> Option<&str> {
    query
        .volunteer_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
}

async fn list_history(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    match load_history(&state, volunteer_filter(&query)).await {
        Ok(data) => HttpResponse::Ok().json(HistoryResponse {
            success: true,
            data,
        }),
        Err(e) => internal_error("Server error while fetching volunteer history", e),
    }
}

async fn export_history_csv(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let records = match load_history(&state, volunteer_filter(&query)).await {
        Ok(records) => records,
        Err(e) => return internal_error("Server error while fetching volunteer history", e),
    };

    match to_csv(&records) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"volunteer_history.csv\""))
            .body(body),
        Err(e) => internal_error("Failed to export volunteer history", e),
    }
}

/// Paginated history report
///
/// GET /api/v1/history/report?volunteerId=&format=text
///
/// JSON pages by default; `format=text` returns the rendered plain text.
async fn history_report(
    state: web::Data<AppState>,
    query: web::Query<HistoryQuery>,
) -> impl Responder {
    let records = match load_history(&state, volunteer_filter(&query)).await {
        Ok(records) => records,
        Err(e) => return internal_error("Server error while fetching volunteer history", e),
    };

    let pages = to_report_pages(&records, &state.report_layout);

    if query.format.as_deref() == Some("text") {
        return HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(render_pages(&pages));
    }

    HttpResponse::Ok().json(ReportResponse {
        total_pages: pages.len(),
        pages,
    })
}
