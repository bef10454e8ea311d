use std::collections::HashMap;

use aws_sdk_sns::Client;

use super::error::{map_publish_error, map_sns_error, map_subscribe_error, map_unsubscribe_error};
use super::protocol::SubscribeProtocol;
use crate::error::{AwsError, Result};

/// Returns the topic name of a topic ARN (its last `:` segment).
pub fn topic_name_from_arn(arn: &str) -> &str {
    arn.rsplit(':').next().unwrap_or(arn)
}

/// Topic names mapped to their ARNs.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    client: Client,
    topics: HashMap<String, String>,
}

impl TopicRegistry {
    /// Lists every topic visible to the client.
    pub async fn load(client: Client) -> Result<Self> {
        let mut arns = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = client
                .list_topics()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| map_sns_error("ListTopics", e))?;

            arns.extend(
                output
                    .topics()
                    .iter()
                    .filter_map(|topic| topic.topic_arn().map(str::to_string)),
            );

            match output.next_token {
                Some(token) => next_token = Some(token),
                None => break,
            }
        }

        tracing::debug!(count = arns.len(), "loaded topics");
        Ok(Self::from_arns(client, arns))
    }

    pub fn from_arns(client: Client, arns: impl IntoIterator<Item = String>) -> Self {
        let topics = arns
            .into_iter()
            .map(|arn| (topic_name_from_arn(&arn).to_string(), arn))
            .collect();
        Self { client, topics }
    }

    pub fn target_arn(&self, name: &str) -> Option<&str> {
        self.topics.get(name).map(String::as_str)
    }

    /// Topic names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.topics.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns a [`Notification`] bound to the named topic.
    pub fn topic(&self, name: &str) -> Result<Notification> {
        match self.target_arn(name) {
            Some(arn) => Ok(Notification::new(self.client.clone(), name, arn)),
            None => {
                tracing::error!(topic = name, "topic not found");
                Err(AwsError::TopicNotFound(name.to_string()))
            }
        }
    }
}

/// Creates a topic and returns its ARN. Creating an existing topic returns its ARN.
pub async fn create_topic(client: &Client, name: &str) -> Result<String> {
    let output = client
        .create_topic()
        .name(name)
        .send()
        .await
        .map_err(|e| map_sns_error("CreateTopic", e))?;

    let arn = output
        .topic_arn
        .ok_or_else(|| AwsError::service("CreateTopic", "response has no topic ARN"))?;
    tracing::debug!(topic = name, arn = %arn, "topic created");
    Ok(arn)
}

pub async fn unsubscribe(client: &Client, subscription_arn: &str) -> Result<()> {
    client
        .unsubscribe()
        .subscription_arn(subscription_arn)
        .send()
        .await
        .map_err(|e| map_unsubscribe_error(e, subscription_arn))?;

    tracing::debug!(subscription_arn, "unsubscribed");
    Ok(())
}

/// An SNS client bound to one topic.
#[derive(Debug, Clone)]
pub struct Notification {
    client: Client,
    topic: String,
    target_arn: String,
}

impl Notification {
    pub fn new(client: Client, topic: impl Into<String>, target_arn: impl Into<String>) -> Self {
        Self {
            client,
            topic: topic.into(),
            target_arn: target_arn.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn target_arn(&self) -> &str {
        &self.target_arn
    }

    /// Publishes a message and returns its message id.
    pub async fn publish(&self, message: &str) -> Result<String> {
        let output = self
            .client
            .publish()
            .target_arn(&self.target_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| map_publish_error(e, &self.topic))?;

        let message_id = output.message_id.unwrap_or_default();
        tracing::debug!(topic = %self.topic, message_id = %message_id, "published");
        Ok(message_id)
    }

    /// Subscribes an endpoint and returns the subscription ARN.
    pub async fn subscribe(&self, protocol: SubscribeProtocol, endpoint: &str) -> Result<String> {
        let output = self
            .client
            .subscribe()
            .topic_arn(&self.target_arn)
            .protocol(protocol.as_str())
            .endpoint(endpoint)
            .return_subscription_arn(true)
            .send()
            .await
            .map_err(|e| map_subscribe_error(e, &self.topic))?;

        let subscription_arn = output
            .subscription_arn
            .ok_or_else(|| AwsError::service("Subscribe", "response has no subscription ARN"))?;
        tracing::debug!(
            topic = %self.topic,
            protocol = %protocol,
            subscription_arn = %subscription_arn,
            "subscribed"
        );
        Ok(subscription_arn)
    }
}
