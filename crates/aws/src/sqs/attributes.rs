use std::collections::HashMap;

use aws_sdk_sqs::types::QueueAttributeName;

const FIFO_SUFFIX: &str = ".fifo";

/// Returns true for FIFO queue names.
pub fn is_fifo_queue(name: &str) -> bool {
    name.ends_with(FIFO_SUFFIX)
}

/// Attributes applied when creating a queue. Values are in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueAttributes {
    pub delay_seconds: u32,
    pub message_retention_period: u32,
    pub visibility_timeout: u32,
}

impl Default for QueueAttributes {
    fn default() -> Self {
        Self {
            delay_seconds: 0,
            message_retention_period: 86_400,
            visibility_timeout: 0,
        }
    }
}

impl QueueAttributes {
    pub(crate) fn to_attribute_map(self, fifo: bool) -> HashMap<QueueAttributeName, String> {
        let mut attributes = HashMap::from([
            (QueueAttributeName::DelaySeconds, self.delay_seconds.to_string()),
            (
                QueueAttributeName::MessageRetentionPeriod,
                self.message_retention_period.to_string(),
            ),
            (
                QueueAttributeName::VisibilityTimeout,
                self.visibility_timeout.to_string(),
            ),
        ]);
        if fifo {
            attributes.insert(QueueAttributeName::FifoQueue, "true".to_string());
        }
        attributes
    }
}

/// One entry SendMessageBatch rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub id: String,
    pub code: String,
    pub message: Option<String>,
    pub sender_fault: bool,
}

/// Outcome of a bulk send across every chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSendReport {
    /// Ids of the entries that were accepted.
    pub sent: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl BatchSendReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Splits `items` into chunks of at most `size` elements.
pub fn chunk<T>(items: &[T], size: usize) -> impl Iterator<Item = &[T]> {
    items.chunks(size.max(1))
}
