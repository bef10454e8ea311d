use thiserror::Error;

/// Errors raised while interpreting account data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Unknown stream event type: {0}")]
    UnknownEventType(String),
    #[error("Missing attribute `{attribute}` on account {user_id}")]
    MissingAttribute {
        attribute: &'static str,
        user_id: String,
    },
    #[error("Invalid notification payload: {0}")]
    InvalidPayload(String),
}
