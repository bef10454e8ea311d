//! Outbound notification seam.

use async_trait::async_trait;
use thiserror::Error;

use crate::account::AccountNotification;

/// Errors that can occur while publishing a notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Topic not found: {0}")]
    TopicNotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Publish failed: {0}")]
    PublishFailed(String),
}

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, PublishError>;

/// Publishes account notifications to subscribers.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    /// Publishes a notification, returning the message id assigned by the broker.
    async fn publish(&self, notification: &AccountNotification) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_error_display() {
        let error = PublishError::TopicNotFound("topic-dev-account".to_string());
        assert_eq!(error.to_string(), "Topic not found: topic-dev-account");
    }
}
