pub mod account_stream;
pub mod stats_queue;

pub use account_stream::{handle_account_stream, StreamSummary};
pub use stats_queue::{handle_stats_queue, QueueSummary};
