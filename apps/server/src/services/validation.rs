//! Validation of generic notification requests.
//!
//! Rules run in a fixed order and stop at the first failure. The rejection
//! text of each rule is part of the public HTTP contract.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::models::{EmbedField, NotificationType, ValidatedNotification};

static DISCORD_WEBHOOK_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://discord\.com/api/webhooks/[0-9]+/[A-Za-z0-9_-]+$")
        .expect("webhook URL pattern is valid")
});

/// Reason a notification request was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("No message data provided")]
    MissingContent,

    #[error("Invalid Discord webhook URL")]
    InvalidWebhookUrl,

    #[error("Invalid fields provided")]
    InvalidFields,

    #[error("Invalid or missing description")]
    InvalidDescription,

    #[error("Invalid or missing contentTitle")]
    InvalidContentTitle,

    #[error("Invalid or missing title")]
    InvalidTitle,

    #[error("Invalid or missing type. Must be 'GOOD', 'CRITICAL', 'WARNING', 'INFO'")]
    InvalidType,
}

/// Returns true for `https://discord.com/api/webhooks/<numeric id>/<token>`
pub fn is_valid_discord_webhook_url(url: &str) -> bool {
    DISCORD_WEBHOOK_URL.is_match(url)
}

/// Looks up `key`, treating a falsy value (`null`, `false`, `0`, `""`) as absent.
/// Non-empty strings, arrays and objects, empty ones included, are present.
pub fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !is_falsy(value))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Validates the full request body (the object holding `content`)
pub fn validate_request(body: &Value) -> Result<ValidatedNotification, ValidationError> {
    let content = present(body, "content").ok_or(ValidationError::MissingContent)?;
    validate_content(content)
}

/// Validates the `content` object of a notification request.
///
/// A `content` value that is not an object behaves like an empty object, so
/// it fails on the webhook URL rule.
pub fn validate_content(content: &Value) -> Result<ValidatedNotification, ValidationError> {
    let empty = Map::new();
    let content = content.as_object().unwrap_or(&empty);

    let webhook_url = match content.get("discordWebhookUrl") {
        Some(Value::String(url)) if is_valid_discord_webhook_url(url) => url.clone(),
        _ => return Err(ValidationError::InvalidWebhookUrl),
    };

    let fields = content
        .get("fields")
        .and_then(parse_fields)
        .ok_or(ValidationError::InvalidFields)?;

    let description =
        non_blank_string(content, "description").ok_or(ValidationError::InvalidDescription)?;
    let content_title =
        non_blank_string(content, "contentTitle").ok_or(ValidationError::InvalidContentTitle)?;
    let title = non_blank_string(content, "title").ok_or(ValidationError::InvalidTitle)?;

    let notification_type = content
        .get("type")
        .and_then(Value::as_str)
        .and_then(NotificationType::from_wire)
        .ok_or(ValidationError::InvalidType)?;

    Ok(ValidatedNotification {
        description,
        content_title,
        title,
        notification_type,
        fields,
        webhook_url,
    })
}

/// Parses `fields`, returning `None` if any element is malformed
fn parse_fields(value: &Value) -> Option<Vec<EmbedField>> {
    value.as_array()?.iter().map(parse_field).collect()
}

/// Keeps `name`, `value` and `inline`; any other key is dropped
fn parse_field(value: &Value) -> Option<EmbedField> {
    let field = value.as_object()?;

    let name = field.get("name")?.as_str()?;
    let value = field.get("value")?.as_str()?;

    // A present key must hold a boolean, including an explicit null
    let inline = match field.get("inline") {
        None => None,
        Some(Value::Bool(inline)) => Some(*inline),
        Some(_) => return None,
    };

    Some(EmbedField {
        name: name.to_string(),
        value: value.to_string(),
        inline,
    })
}

/// Returns the string under `key` unless it is missing, not a string, or blank.
/// The value is returned untrimmed.
fn non_blank_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
