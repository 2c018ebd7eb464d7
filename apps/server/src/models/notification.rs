//! Models for inbound notification requests.
//!
//! The inbound payload is shape-checked by the validator and lands here as
//! typed values; nothing in this module inspects raw JSON.

use serde::{Deserialize, Serialize};

// =============================================================================
// Notification Type Enum
// =============================================================================

/// Severity of a notification, which decides the embed color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    #[default]
    Good,
    Critical,
    Warning,
    Info,
}

impl NotificationType {
    pub const ALL: [NotificationType; 4] = [
        NotificationType::Good,
        NotificationType::Critical,
        NotificationType::Warning,
        NotificationType::Info,
    ];

    /// Parses the wire name. Matching is exact and case-sensitive.
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "GOOD" => Some(NotificationType::Good),
            "CRITICAL" => Some(NotificationType::Critical),
            "WARNING" => Some(NotificationType::Warning),
            "INFO" => Some(NotificationType::Info),
            _ => None,
        }
    }

    /// Embed color as a 24-bit RGB integer
    pub fn color(self) -> u32 {
        match self {
            NotificationType::Good => colors::GREEN,
            NotificationType::Critical => colors::RED,
            NotificationType::Warning => colors::YELLOW,
            NotificationType::Info => colors::INFO_BLUE,
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Good => write!(f, "GOOD"),
            NotificationType::Critical => write!(f, "CRITICAL"),
            NotificationType::Warning => write!(f, "WARNING"),
            NotificationType::Info => write!(f, "INFO"),
        }
    }
}

/// Embed colors
pub mod colors {
    /// 0x00FF00
    pub const GREEN: u32 = 65280;
    /// 0xFF0000
    pub const RED: u32 = 16711680;
    /// 0xFFFF00
    pub const YELLOW: u32 = 16776960;
    /// 0x003399, a dark blue rather than Discord's usual blurple
    pub const INFO_BLUE: u32 = 13209;
}

// =============================================================================
// Embed Field
// =============================================================================

/// One name/value row of a Discord embed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline: Option<bool>,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: None,
        }
    }

    pub fn inline(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            inline: Some(true),
        }
    }
}

// =============================================================================
// Validated Notification
// =============================================================================

/// A generic notification that passed every validation rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedNotification {
    pub description: String,
    pub content_title: String,
    pub title: String,
    pub notification_type: NotificationType,
    pub fields: Vec<EmbedField>,
    pub webhook_url: String,
}
