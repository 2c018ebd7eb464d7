pub mod discord;
pub mod notification;

pub use discord::{Embed, OutboundMessage};
pub use notification::{colors, EmbedField, NotificationType, ValidatedNotification};
