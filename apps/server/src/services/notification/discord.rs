//! Discord webhook client.
//!
//! Posts a JSON message to an execute-webhook URL. The token embedded in the
//! URL is the only credential.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use super::{DeliveryError, DeliveryReceipt, WebhookDelivery};
use crate::models::OutboundMessage;

/// Discord webhook delivery over HTTPS
#[derive(Clone)]
pub struct DiscordClient {
    client: reqwest::Client,
}

impl DiscordClient {
    /// Creates a client. Without a timeout, requests wait for the OS to give up
    /// on the socket.
    pub fn new(timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl WebhookDelivery for DiscordClient {
    async fn deliver(
        &self,
        webhook_url: &str,
        message: &OutboundMessage,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let url = Url::parse(webhook_url)?;

        let response = self.client.post(url).json(message).send().await?;

        let status = response.status();
        // Drain the body so the exchange only counts once the response ended
        let body = response.bytes().await?;

        if status.is_success() {
            log::debug!("Discord accepted message with HTTP {}", status.as_u16());
        } else {
            log::warn!(
                "Discord responded with HTTP {}: {}",
                status.as_u16(),
                String::from_utf8_lossy(&body)
            );
        }

        Ok(DeliveryReceipt {
            http_status: status.as_u16(),
        })
    }
}
