pub mod message;
pub mod notification;
pub mod validation;

pub use message::{build_incident_message, build_notification_message};
pub use notification::{DeliveryError, DeliveryReceipt, DiscordClient, WebhookDelivery};
pub use validation::{validate_request, ValidationError};
