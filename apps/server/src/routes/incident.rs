//! Monitoring incident relay.
//!
//! - POST /incident - Format `incident` and post it to DISCORD_WEBHOOK_URL

use actix_web::{http::header::ContentType, web, HttpResponse};

use super::parse_json_body;
use crate::config::Config;
use crate::error::{AppError, AppResult, SENT_MESSAGE};
use crate::services::validation::present;
use crate::services::{build_incident_message, DeliveryError, WebhookDelivery};

/// POST /incident
pub async fn send_incident(
    config: web::Data<Config>,
    delivery: web::Data<dyn WebhookDelivery>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let request = parse_json_body(&body);

    let incident = present(&request, "incident").ok_or(AppError::MissingIncident)?;

    let message = build_incident_message(incident);

    let webhook_url = config
        .discord
        .webhook_url
        .as_deref()
        .ok_or(DeliveryError::MissingWebhookUrl)?;

    let receipt = delivery.deliver(webhook_url, &message).await?;

    log::info!(
        "Relayed incident \"{}\" (Discord HTTP {})",
        message.content,
        receipt.http_status
    );

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(SENT_MESSAGE))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/incident", web::post().to(send_incident));
}
