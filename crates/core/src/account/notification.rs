use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AccountError;

/// Kind of change reported by the account table stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamEventType {
    Insert,
    Modify,
    Remove,
}

impl StreamEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamEventType::Insert => "INSERT",
            StreamEventType::Modify => "MODIFY",
            StreamEventType::Remove => "REMOVE",
        }
    }
}

impl fmt::Display for StreamEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StreamEventType {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSERT" => Ok(StreamEventType::Insert),
            "MODIFY" => Ok(StreamEventType::Modify),
            "REMOVE" => Ok(StreamEventType::Remove),
            other => Err(AccountError::UnknownEventType(other.to_string())),
        }
    }
}

/// Login notification published to the account topic and consumed from the stats queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNotification {
    pub user_id: String,
    /// `last_login` before the change, 0 when the row is new.
    pub pre_last_login: i64,
    pub last_login: i64,
    pub event_type: StreamEventType,
    /// Unix seconds the notification was produced.
    pub timestamp: i64,
}

impl AccountNotification {
    /// Parses a notification from a JSON message body.
    pub fn from_json(body: &str) -> Result<Self, AccountError> {
        serde_json::from_str(body).map_err(|e| AccountError::InvalidPayload(e.to_string()))
    }

    /// Encodes the notification as a JSON message body.
    pub fn to_json(&self) -> Result<String, AccountError> {
        serde_json::to_string(self).map_err(|e| AccountError::InvalidPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AccountNotification {
        AccountNotification {
            user_id: "user-1".to_string(),
            pre_last_login: 1_712_200_000,
            last_login: 1_712_300_000,
            event_type: StreamEventType::Modify,
            timestamp: 1_712_300_005,
        }
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "user_id": "user-1",
                "pre_last_login": 1_712_200_000,
                "last_login": 1_712_300_000,
                "event_type": "MODIFY",
                "timestamp": 1_712_300_005
            })
        );
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        let result = AccountNotification::from_json("{\"user_id\": 3}");
        assert!(matches!(result, Err(AccountError::InvalidPayload(_))));
    }

    #[test]
    fn test_event_type_parse() {
        assert_eq!(
            "INSERT".parse::<StreamEventType>().unwrap(),
            StreamEventType::Insert
        );
        assert_eq!(
            "REMOVE".parse::<StreamEventType>().unwrap(),
            StreamEventType::Remove
        );
        assert_eq!(
            "modify".parse::<StreamEventType>(),
            Err(AccountError::UnknownEventType("modify".to_string()))
        );
    }
}
