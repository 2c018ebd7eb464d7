//! Builds Discord webhook messages from notifications and incidents.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::models::{colors, Embed, EmbedField, OutboundMessage, ValidatedNotification};

/// Rendering of a missing incident attribute
pub const MISSING_VALUE: &str = "undefined";

/// Rendering of an incident start time that cannot be read as a timestamp
pub const INVALID_DATE: &str = "Invalid Date";

/// Formats a validated generic notification
pub fn build_notification_message(notification: &ValidatedNotification) -> OutboundMessage {
    OutboundMessage::single(
        notification.content_title.clone(),
        Embed {
            title: notification.title.clone(),
            description: notification.description.clone(),
            color: notification.notification_type.color(),
            fields: notification.fields.clone(),
        },
    )
}

/// Formats a monitoring incident.
///
/// The incident is not validated: absent attributes render as `undefined`
/// and an unreadable start time as `Invalid Date`.
pub fn build_incident_message(incident: &Value) -> OutboundMessage {
    let state = incident_text(incident, "state");

    OutboundMessage::single(
        incident_text(incident, "policy_name"),
        Embed {
            title: incident_text(incident, "condition_name"),
            description: incident_text(incident, "summary"),
            color: incident_color(incident),
            fields: vec![
                EmbedField::inline("State", state),
                EmbedField::inline(
                    "Started At",
                    format_started_at(incident.get("started_at")),
                ),
            ],
        },
    )
}

/// Red while the incident is open, green otherwise
pub fn incident_color(incident: &Value) -> u32 {
    match incident.get("state").and_then(Value::as_str) {
        Some("open") => colors::RED,
        _ => colors::GREEN,
    }
}

/// Renders an incident start time as `M/D/YYYY, h:mm:ss AM` in UTC.
///
/// Numbers and numeric strings are Unix seconds; other strings must be RFC 3339.
pub fn format_started_at(started_at: Option<&Value>) -> String {
    started_at
        .and_then(parse_timestamp)
        .map(|at| at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(secs) => DateTime::from_timestamp(secs, 0),
            None => {
                let secs = n.as_f64()?;
                DateTime::from_timestamp_millis((secs * 1000.0).round() as i64)
            }
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(secs) => DateTime::from_timestamp(secs, 0),
                Err(_) => DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|at| at.with_timezone(&Utc)),
            }
        }
        _ => None,
    }
}

fn incident_text(incident: &Value, key: &str) -> String {
    match incident.get(key) {
        None => MISSING_VALUE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
