use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use portfolio_core::publish::PublishError;
use portfolio_core::storage::RepositoryError;
use thiserror::Error;

/// Result type alias for AWS wrapper operations.
pub type Result<T> = std::result::Result<T, AwsError>;

/// Errors that can occur while talking to AWS services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AwsError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Request limit exceeded for {operation}: {count} items, at most {limit} allowed")]
    LimitExceeded {
        operation: &'static str,
        count: usize,
        limit: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("Invalid subscribe protocol: {0}")]
    InvalidProtocol(String),

    #[error("{operation} left {count} items unprocessed")]
    Unprocessed {
        operation: &'static str,
        count: usize,
    },

    #[error("Timeout waiting for table '{0}' to become active")]
    TableActivationTimeout(String),

    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
}

impl AwsError {
    pub(crate) fn service(operation: &'static str, message: impl Into<String>) -> Self {
        AwsError::Service {
            operation,
            message: message.into(),
        }
    }

    /// Returns an error if `count` exceeds `limit`.
    pub(crate) fn check_limit(operation: &'static str, count: usize, limit: usize) -> Result<()> {
        if count > limit {
            tracing::error!(
                operation,
                request_items_count = count,
                limit,
                "request parameter exceed"
            );
            return Err(AwsError::LimitExceeded {
                operation,
                count,
                limit,
            });
        }
        Ok(())
    }
}

/// Describes an SDK error by its service code and message.
///
/// `SdkError` and its metadata trait are shared by every `aws-sdk-*` crate.
pub(crate) fn sdk_message<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}

impl From<serde_dynamo::Error> for AwsError {
    fn from(err: serde_dynamo::Error) -> Self {
        AwsError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for AwsError {
    fn from(err: serde_json::Error) -> Self {
        AwsError::Serialization(err.to_string())
    }
}

impl From<AwsError> for RepositoryError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::NotFound { entity, id } => RepositoryError::NotFound {
                entity_type: entity,
                id,
            },
            AwsError::LimitExceeded { count, limit, .. } => {
                RepositoryError::LimitExceeded { count, limit }
            }
            AwsError::Serialization(message) => RepositoryError::Serialization(message),
            AwsError::InvalidInput(message) => RepositoryError::InvalidData(message),
            other => RepositoryError::QueryFailed(other.to_string()),
        }
    }
}

impl From<AwsError> for PublishError {
    fn from(err: AwsError) -> Self {
        match err {
            AwsError::TopicNotFound(topic) => PublishError::TopicNotFound(topic),
            AwsError::Serialization(message) => PublishError::Serialization(message),
            other => PublishError::PublishFailed(other.to_string()),
        }
    }
}
