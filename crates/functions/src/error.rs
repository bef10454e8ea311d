use portfolio_core::account::AccountError;
use portfolio_core::publish::PublishError;
use portfolio_core::stats::RetentionError;
use portfolio_core::storage::RepositoryError;
use thiserror::Error;

/// Errors that abort a Lambda invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Account(#[from] AccountError),

    #[error(transparent)]
    Retention(#[from] RetentionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("Malformed stream image: {0}")]
    Image(String),

    #[error("Message {message_id} has no body")]
    MissingBody { message_id: String },
}

impl From<serde_dynamo::Error> for HandlerError {
    fn from(err: serde_dynamo::Error) -> Self {
        HandlerError::Image(err.to_string())
    }
}
