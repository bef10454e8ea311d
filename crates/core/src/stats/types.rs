use std::fmt;

use serde::{Deserialize, Serialize};

use crate::storage::keys;

/// Category of a stats log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogType {
    /// A login on a different day than the previous one.
    Retention,
}

impl LogType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogType::Retention => "retention",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A log line in the log table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub pk: String,
    pub sk: String,
    pub timestamp: i64,
    pub user_id: String,
    pub log_type: LogType,
    /// Raw payload the log line was derived from.
    pub val: String,
}

impl Stats {
    /// Creates a log line keyed by user and `<log_type>#<timestamp>`.
    pub fn new(
        user_id: impl Into<String>,
        log_type: LogType,
        val: impl Into<String>,
        timestamp: i64,
    ) -> Self {
        let user_id = user_id.into();
        Self {
            pk: keys::stats_pk(&user_id),
            sk: keys::stats_sk(log_type.as_str(), timestamp),
            timestamp,
            user_id,
            log_type,
            val: val.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_keys() {
        let stats = Stats::new("user-1", LogType::Retention, "{}", 1_712_300_000);

        assert_eq!(stats.pk, "user-1");
        assert_eq!(stats.sk, "retention#1712300000");
    }

    #[test]
    fn test_log_type_serializes_lowercase() {
        let stats = Stats::new("user-1", LogType::Retention, "{}", 1);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["log_type"], "retention");
    }
}
