//! Login retention rule.

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

use crate::account::AccountNotification;

use super::{LogType, Stats};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetentionError {
    #[error("Timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

fn to_datetime(timestamp: i64) -> Result<DateTime<Utc>, RetentionError> {
    DateTime::from_timestamp(timestamp, 0).ok_or(RetentionError::InvalidTimestamp(timestamp))
}

/// Returns true when two unix timestamps fall on different UTC calendar days.
pub fn is_diff_date(t1: i64, t2: i64) -> Result<bool, RetentionError> {
    let d1 = to_datetime(t1)?;
    let d2 = to_datetime(t2)?;

    Ok(d1.year() != d2.year() || d1.month() != d2.month() || d1.day() != d2.day())
}

/// Builds the retention log line for a login notification.
///
/// Returns `None` when the previous and current login happened on the same day.
pub fn retention_stats(
    notification: &AccountNotification,
    raw_body: &str,
    now: i64,
) -> Result<Option<Stats>, RetentionError> {
    if !is_diff_date(notification.pre_last_login, notification.last_login)? {
        return Ok(None);
    }

    Ok(Some(Stats::new(
        notification.user_id.clone(),
        LogType::Retention,
        raw_body,
        now,
    )))
}
