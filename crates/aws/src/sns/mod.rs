//! SNS topics and notifications.

mod error;
mod protocol;
mod topic;

pub use aws_sdk_sns::Client;
pub use protocol::SubscribeProtocol;
pub use topic::{create_topic, topic_name_from_arn, unsubscribe, Notification, TopicRegistry};
