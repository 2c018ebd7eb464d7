//! Outbound delivery of Discord webhook messages.
//!
//! Handlers depend on the [`WebhookDelivery`] trait so the transport can be
//! swapped out; [`DiscordClient`] is the reqwest-backed implementation.

pub mod discord;

use async_trait::async_trait;

use crate::models::OutboundMessage;

pub use discord::DiscordClient;

// =============================================================================
// Delivery Outcome
// =============================================================================

/// A completed exchange with the webhook endpoint.
///
/// Reaching this state only means the response body was read in full; the
/// remote status is informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub http_status: u16,
}

impl DeliveryReceipt {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.http_status)
    }
}

/// Transport-level failure while talking to the webhook endpoint
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("no Discord webhook URL configured")]
    MissingWebhookUrl,

    #[error("webhook URL could not be parsed: {0}")]
    InvalidWebhookUrl(#[from] url::ParseError),

    #[error("request to Discord timed out")]
    Timeout,

    #[error("connection to Discord failed: {0}")]
    Connect(reqwest::Error),

    #[error("Discord request failed: {0}")]
    Request(reqwest::Error),
}

impl From<reqwest::Error> for DeliveryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            DeliveryError::Timeout
        } else if e.is_connect() {
            DeliveryError::Connect(e)
        } else {
            DeliveryError::Request(e)
        }
    }
}

// =============================================================================
// Delivery Trait
// =============================================================================

/// Sends one message to one webhook URL, exactly once
#[async_trait]
pub trait WebhookDelivery: Send + Sync {
    async fn deliver(
        &self,
        webhook_url: &str,
        message: &OutboundMessage,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}
