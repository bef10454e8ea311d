use aws_sdk_sqs::types::{QueueAttributeName, SendMessageBatchRequestEntry};
use aws_sdk_sqs::Client;
use serde::Serialize;
use tokio::sync::OnceCell;
use uuid::Uuid;

use super::attributes::{chunk, is_fifo_queue, BatchFailure, BatchSendReport, QueueAttributes};
use super::error::{map_get_queue_url_error, map_sqs_error};
use crate::error::{AwsError, Result};

/// Maximum number of entries in a single SendMessageBatch call.
pub const SEND_BATCH_LIMIT: usize = 10;

/// An SQS client bound to one queue. The queue URL is resolved once.
#[derive(Debug)]
pub struct Queue {
    client: Client,
    name: String,
    url: OnceCell<String>,
}

impl Queue {
    pub fn new(client: Client, name: impl Into<String>) -> Self {
        Self {
            client,
            name: name.into(),
            url: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_fifo(&self) -> bool {
        is_fifo_queue(&self.name)
    }

    /// Creates the queue and returns its URL.
    pub async fn create(&self, attributes: Option<QueueAttributes>) -> Result<String> {
        let attributes = attributes.unwrap_or_default().to_attribute_map(self.is_fifo());

        let output = self
            .client
            .create_queue()
            .queue_name(&self.name)
            .set_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| map_sqs_error("CreateQueue", e))?;

        let url = output
            .queue_url
            .ok_or_else(|| AwsError::service("CreateQueue", "response has no queue URL"))?;
        if self.url.set(url.clone()).is_err() {
            tracing::debug!(queue = %self.name, "queue URL already cached");
        }

        tracing::debug!(queue = %self.name, url = %url, "queue created");
        Ok(url)
    }

    /// Returns the queue URL, calling GetQueueUrl on first use.
    pub async fn url(&self) -> Result<&str> {
        self.url
            .get_or_try_init(|| self.fetch_url())
            .await
            .map(String::as_str)
    }

    async fn fetch_url(&self) -> Result<String> {
        let output = self
            .client
            .get_queue_url()
            .queue_name(&self.name)
            .send()
            .await
            .map_err(|e| map_get_queue_url_error(e, &self.name))?;

        output
            .queue_url
            .ok_or_else(|| AwsError::service("GetQueueUrl", "response has no queue URL"))
    }

    pub async fn arn(&self) -> Result<String> {
        let url = self.url().await?;

        let output = self
            .client
            .get_queue_attributes()
            .queue_url(url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .map_err(|e| map_sqs_error("GetQueueAttributes", e))?;

        output
            .attributes
            .and_then(|mut attributes| attributes.remove(&QueueAttributeName::QueueArn))
            .ok_or_else(|| AwsError::service("GetQueueAttributes", "response has no QueueArn"))
    }

    /// Sends one JSON-encoded message and returns its message id.
    pub async fn send<T: Serialize + ?Sized>(&self, message: &T) -> Result<String> {
        let body = serde_json::to_string(message)?;
        self.send_raw(&body).await
    }

    /// Sends a message body as-is and returns its message id.
    pub async fn send_raw(&self, body: &str) -> Result<String> {
        if body.is_empty() {
            return Err(AwsError::InvalidInput("message body is empty".to_string()));
        }

        let url = self.url().await?;
        let mut request = self.client.send_message().queue_url(url).message_body(body);

        if self.is_fifo() {
            let id = Uuid::new_v4().to_string();
            request = request
                .message_deduplication_id(&id)
                .message_group_id(id);
        }

        let output = request
            .send()
            .await
            .map_err(|e| map_sqs_error("SendMessage", e))?;

        let message_id = output.message_id.unwrap_or_default();
        tracing::debug!(queue = %self.name, message_id = %message_id, "message sent");
        Ok(message_id)
    }

    /// Sends every message, [`SEND_BATCH_LIMIT`] per SendMessageBatch call.
    ///
    /// Entry ids are the message positions in `messages`. Entries the service
    /// rejects are collected in the report; SDK errors abort the send.
    pub async fn bulk_send<T: Serialize>(&self, messages: &[T]) -> Result<BatchSendReport> {
        let entries = messages
            .iter()
            .enumerate()
            .map(|(position, message)| self.batch_entry(position, message))
            .collect::<Result<Vec<_>>>()?;

        let mut report = BatchSendReport::default();
        if entries.is_empty() {
            return Ok(report);
        }

        let url = self.url().await?;
        for entries in chunk(&entries, SEND_BATCH_LIMIT) {
            let output = self
                .client
                .send_message_batch()
                .queue_url(url)
                .set_entries(Some(entries.to_vec()))
                .send()
                .await
                .map_err(|e| map_sqs_error("SendMessageBatch", e))?;

            report
                .sent
                .extend(output.successful().iter().map(|entry| entry.id().to_string()));
            report
                .failed
                .extend(output.failed().iter().map(|entry| BatchFailure {
                    id: entry.id().to_string(),
                    code: entry.code().to_string(),
                    message: entry.message().map(str::to_string),
                    sender_fault: entry.sender_fault(),
                }));
        }

        if !report.is_complete() {
            tracing::error!(
                queue = %self.name,
                failed = report.failed.len(),
                "bulk send incomplete"
            );
        }
        tracing::debug!(queue = %self.name, sent = report.sent.len(), "bulk send");
        Ok(report)
    }

    fn batch_entry<T: Serialize>(
        &self,
        position: usize,
        message: &T,
    ) -> Result<SendMessageBatchRequestEntry> {
        let mut entry = SendMessageBatchRequestEntry::builder()
            .id(position.to_string())
            .message_body(serde_json::to_string(message)?);

        if self.is_fifo() {
            let id = Uuid::new_v4().to_string();
            entry = entry.message_deduplication_id(&id).message_group_id(id);
        }

        entry
            .build()
            .map_err(|e| AwsError::InvalidInput(e.to_string()))
    }
}
