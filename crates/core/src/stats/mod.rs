mod retention;
mod types;

pub use retention::{is_diff_date, retention_stats, RetentionError};
pub use types::{LogType, Stats};
