//! SQS error mapping.

use std::fmt::Debug;

use aws_sdk_sqs::error::SdkError;
use aws_sdk_sqs::operation::get_queue_url::GetQueueUrlError;

use crate::error::{sdk_message, AwsError};

/// Map a GetQueueUrl SDK error to AwsError.
pub fn map_get_queue_url_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetQueueUrlError, R>,
    queue_name: &str,
) -> AwsError {
    match err.into_service_error() {
        GetQueueUrlError::QueueDoesNotExist(_) => AwsError::NotFound {
            entity: "Queue",
            id: queue_name.to_string(),
        },
        err => AwsError::service("GetQueueUrl", format!("{:?}", err)),
    }
}

/// Map any other SQS SDK error to AwsError.
pub fn map_sqs_error<E, R>(operation: &'static str, err: SdkError<E, R>) -> AwsError
where
    E: aws_sdk_sqs::error::ProvideErrorMetadata + std::error::Error + 'static,
    R: Debug,
{
    AwsError::service(operation, sdk_message(&err))
}
