//! Generic notification relay.
//!
//! - POST /notify - Validate `content` and post it to its Discord webhook
//! - POST / - Same as /notify

use actix_web::{http::header::ContentType, web, HttpResponse};

use super::parse_json_body;
use crate::error::{AppResult, SENT_MESSAGE};
use crate::services::{build_notification_message, validate_request, WebhookDelivery};

/// POST /notify
pub async fn send_notification(
    delivery: web::Data<dyn WebhookDelivery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let request = parse_json_body(&body);

    let notification = validate_request(&request)
        .inspect_err(|e| log::debug!("Rejected notification: {}", e))?;

    let message = build_notification_message(&notification);
    let receipt = delivery
        .deliver(&notification.webhook_url, &message)
        .await?;

    log::info!(
        "Relayed {} notification \"{}\" (Discord HTTP {})",
        notification.notification_type,
        notification.title,
        receipt.http_status
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(SENT_MESSAGE))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/notify", web::post().to(send_notification))
        .route("/", web::post().to(send_notification));
}
