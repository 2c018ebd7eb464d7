use actix_web::{http::header::ContentType, http::StatusCode, HttpResponse, ResponseError};

use crate::services::notification::DeliveryError;
use crate::services::validation::ValidationError;

/// Body returned after the webhook exchange completed
pub const SENT_MESSAGE: &str = "Notification sent to Discord";

/// Body returned for every delivery failure; the cause is only logged
pub const DELIVERY_FAILED_MESSAGE: &str = "Error sending notification to Discord";

/// Application errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("No incident data provided")]
    MissingIncident,

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MissingIncident => StatusCode::BAD_REQUEST,
            AppError::Delivery(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::Delivery(e) => {
                log::error!("Error sending notification to Discord: {}", e);
                DELIVERY_FAILED_MESSAGE.to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(body)
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
