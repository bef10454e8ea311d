//! SNS error mapping.

use std::fmt::Debug;

use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::publish::PublishError;
use aws_sdk_sns::operation::subscribe::SubscribeError;
use aws_sdk_sns::operation::unsubscribe::UnsubscribeError;

use crate::error::{sdk_message, AwsError};

/// Map a Publish SDK error to AwsError.
pub fn map_publish_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PublishError, R>,
    topic: &str,
) -> AwsError {
    match err.into_service_error() {
        PublishError::NotFoundException(_) => AwsError::TopicNotFound(topic.to_string()),
        PublishError::AuthorizationErrorException(_) => {
            AwsError::service("Publish", format!("Not authorized to publish to {topic}"))
        }
        err => AwsError::service("Publish", format!("{:?}", err)),
    }
}

/// Map a Subscribe SDK error to AwsError.
pub fn map_subscribe_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<SubscribeError, R>,
    topic: &str,
) -> AwsError {
    match err.into_service_error() {
        SubscribeError::NotFoundException(_) => AwsError::TopicNotFound(topic.to_string()),
        err => AwsError::service("Subscribe", format!("{:?}", err)),
    }
}

/// Map an Unsubscribe SDK error to AwsError.
pub fn map_unsubscribe_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UnsubscribeError, R>,
    subscription_arn: &str,
) -> AwsError {
    match err.into_service_error() {
        UnsubscribeError::NotFoundException(_) => AwsError::NotFound {
            entity: "Subscription",
            id: subscription_arn.to_string(),
        },
        err => AwsError::service("Unsubscribe", format!("{:?}", err)),
    }
}

/// Map any other SNS SDK error to AwsError.
pub fn map_sns_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> AwsError
where
    E: aws_sdk_sns::error::ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    AwsError::service(operation, sdk_message(&err))
}
