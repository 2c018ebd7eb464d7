pub mod health;
pub mod incident;
pub mod notify;

use actix_web::web;
use serde_json::Value;

/// Registers every route of the relay
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::liveness));
    notify::configure(cfg);
    incident::configure(cfg);
}

/// Parses a request body as JSON. Anything that is not JSON reads as `null`,
/// which every handler treats as a body without data.
pub(crate) fn parse_json_body(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}
