//! Queue-bound SQS wrapper.

mod attributes;
mod error;
mod queue;

pub use attributes::{chunk, is_fifo_queue, BatchFailure, BatchSendReport, QueueAttributes};
pub use aws_sdk_sqs::Client;
pub use queue::{Queue, SEND_BATCH_LIMIT};
