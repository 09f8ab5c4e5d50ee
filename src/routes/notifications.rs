use crate::models::{
    Notification, NotificationQuery, NotificationSentResponse, NotificationsResponse,
    SendNotificationRequest,
};
use crate::routes::{bad_request, internal_error, AppState};
use crate::services::NotificationStore;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// Configure notification feed routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/notifications", web::get().to(list_notifications))
        .route("/notifications", web::post().to(send_notification));
}

async fn list_notifications(
    state: web::Data<AppState>,
    query: web::Query<NotificationQuery>,
) -> impl Responder {
    let recipient = query.recipient.as_deref().map(str::trim).filter(|r| !r.is_empty());

    match state.store.list_notifications(recipient).await {
        Ok(notifications) => {
            let message = notifications
                .is_empty()
                .then(|| "No notifications available.".to_string());
            HttpResponse::Ok().json(NotificationsResponse {
                notifications,
                message,
            })
        }
        Err(e) => internal_error("Failed to fetch notifications", e),
    }
}

async fn send_notification(
    state: web::Data<AppState>,
    req: web::Json<SendNotificationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let notification = Notification::new(req.recipient.trim(), req.message.trim());

    match state.store.insert_notification(notification).await {
        Ok(notification) => {
            tracing::debug!("Notification {} sent to {}", notification.id, notification.recipient);
            HttpResponse::Created().json(NotificationSentResponse {
                message: "Notification sent".to_string(),
                notification,
            })
        }
        Err(e) => internal_error("Failed to send notification", e),
    }
}
