//! Discord execute-webhook payload.
//!
//! Only the subset the relay sends: message content plus a single embed.

use serde::Serialize;

use super::EmbedField;

/// Body of `POST /api/webhooks/{id}/{token}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub content: String,
    pub embeds: Vec<Embed>,
}

/// Rich embed attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

impl OutboundMessage {
    /// Builds a message carrying exactly one embed
    pub fn single(content: String, embed: Embed) -> Self {
        Self {
            content,
            embeds: vec![embed],
        }
    }
}
