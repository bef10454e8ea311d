//! Account table stream handler.
//!
//! Every login or account insert on the account table produces an
//! [`AccountNotification`] on the account topic. Rows that are not accounts
//! and removed accounts are skipped.

use aws_lambda_events::event::dynamodb::{Event, EventRecord};
use portfolio_core::account::{AccountError, AccountNotification, StreamEventType};
use portfolio_core::publish::NotificationPublisher;
use portfolio_core::storage::keys;
use serde::{Deserialize, Serialize};

use crate::HandlerError;

/// Outcome of one stream batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub published: usize,
    pub skipped: usize,
}

#[derive(Debug, Deserialize)]
struct StreamKeys {
    #[serde(default)]
    pk: String,
    #[serde(default)]
    sk: String,
}

#[derive(Debug, Default, Deserialize)]
struct AccountImage {
    user_id: Option<String>,
    last_login: Option<i64>,
}

/// Publishes a notification for every inserted or modified account.
///
/// The first failing record aborts the batch so the stream retries it.
pub async fn handle_account_stream(
    event: Event,
    publisher: &dyn NotificationPublisher,
    now: i64,
) -> Result<StreamSummary, HandlerError> {
    let mut summary = StreamSummary::default();

    for record in event.records {
        match notification_for(record, now)? {
            Some(notification) => {
                let message_id = publisher.publish(&notification).await?;
                tracing::debug!(
                    user_id = %notification.user_id,
                    event_type = %notification.event_type,
                    message_id = %message_id,
                    "published account notification"
                );
                summary.published += 1;
            }
            None => summary.skipped += 1,
        }
    }

    tracing::info!(
        published = summary.published,
        skipped = summary.skipped,
        "account stream processed"
    );
    Ok(summary)
}

fn notification_for(
    record: EventRecord,
    now: i64,
) -> Result<Option<AccountNotification>, HandlerError> {
    let change = record.change;

    let stream_keys: StreamKeys = serde_dynamo::from_item(change.keys)?;
    if !keys::is_account_sk(&stream_keys.sk) {
        tracing::debug!(pk = %stream_keys.pk, sk = %stream_keys.sk, "not an account row");
        return Ok(None);
    }

    let event_type: StreamEventType = record.event_name.parse()?;
    if event_type == StreamEventType::Remove {
        tracing::debug!(pk = %stream_keys.pk, "account removed");
        return Ok(None);
    }

    let old: AccountImage = serde_dynamo::from_item(change.old_image)?;
    let new: AccountImage = serde_dynamo::from_item(change.new_image)?;

    let user_id = new.user_id.ok_or_else(|| AccountError::MissingAttribute {
        attribute: "user_id",
        user_id: stream_keys.pk.clone(),
    })?;
    let last_login = new.last_login.ok_or_else(|| AccountError::MissingAttribute {
        attribute: "last_login",
        user_id: user_id.clone(),
    })?;

    Ok(Some(AccountNotification {
        user_id,
        pre_last_login: old.last_login.unwrap_or(0),
        last_login,
        event_type,
        timestamp: now,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use portfolio_core::publish::{PublishError, Result as PublishResult};
    use serde_json::{json, Value};

    use super::*;

    const NOW: i64 = 1_712_400_000;

    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<AccountNotification>>,
        fail: bool,
    }

    impl RecordingPublisher {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn published(&self) -> Vec<AccountNotification> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationPublisher for RecordingPublisher {
        async fn publish(&self, notification: &AccountNotification) -> PublishResult<String> {
            if self.fail {
                return Err(PublishError::TopicNotFound("topic-dev-account".to_string()));
            }
            let mut published = self.published.lock().unwrap();
            published.push(notification.clone());
            Ok(format!("msg-{}", published.len()))
        }
    }

    fn image(user_id: &str, last_login: Option<i64>) -> Value {
        let mut image = json!({
            "pk": {"S": user_id},
            "sk": {"S": "account#"},
            "user_id": {"S": user_id},
            "exp": {"N": "1712000000"},
            "updated": {"N": "1712000000"}
        });
        if let Some(last_login) = last_login {
            image["last_login"] = json!({"N": last_login.to_string()});
        }
        image
    }

    fn record(event_name: &str, sk: &str, old: Option<Value>, new: Option<Value>) -> Value {
        let mut change = json!({
            "ApproximateCreationDateTime": 1712400000.0,
            "Keys": {
                "pk": {"S": "user-1"},
                "sk": {"S": sk}
            },
            "SequenceNumber": "111",
            "SizeBytes": 26,
            "StreamViewType": "NEW_AND_OLD_IMAGES"
        });
        if let Some(old) = old {
            change["OldImage"] = old;
        }
        if let Some(new) = new {
            change["NewImage"] = new;
        }

        json!({
            "eventID": "c4ca4238a0b923820dcc509a6f75849b",
            "eventName": event_name,
            "eventVersion": "1.1",
            "eventSource": "aws:dynamodb",
            "awsRegion": "us-east-1",
            "dynamodb": change,
            "eventSourceARN": "arn:aws:dynamodb:us-east-1:123456789012:table/portfolio/stream/2024-04-05T00:00:00.000"
        })
    }

    fn event(records: Vec<Value>) -> Event {
        serde_json::from_value(json!({ "Records": records })).unwrap()
    }

    #[tokio::test]
    async fn test_modify_publishes_previous_and_current_login() {
        let publisher = RecordingPublisher::default();
        let event = event(vec![record(
            "MODIFY",
            "account#",
            Some(image("user-1", Some(1_712_200_000))),
            Some(image("user-1", Some(1_712_300_000))),
        )]);

        let summary = handle_account_stream(event, &publisher, NOW).await.unwrap();

        assert_eq!(
            summary,
            StreamSummary {
                published: 1,
                skipped: 0
            }
        );
        assert_eq!(
            publisher.published(),
            vec![AccountNotification {
                user_id: "user-1".to_string(),
                pre_last_login: 1_712_200_000,
                last_login: 1_712_300_000,
                event_type: StreamEventType::Modify,
                timestamp: NOW,
            }]
        );
    }

    #[tokio::test]
    async fn test_insert_without_old_image() {
        let publisher = RecordingPublisher::default();
        let event = event(vec![record(
            "INSERT",
            "account#",
            None,
            Some(image("user-1", Some(0))),
        )]);

        handle_account_stream(event, &publisher, NOW).await.unwrap();

        let published = publisher.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].pre_last_login, 0);
        assert_eq!(published[0].last_login, 0);
        assert_eq!(published[0].event_type, StreamEventType::Insert);
    }

    #[tokio::test]
    async fn test_skips_other_rows_and_removals() {
        let publisher = RecordingPublisher::default();
        let event = event(vec![
            record("INSERT", "retention#1712300000", None, Some(image("user-1", Some(1)))),
            record("REMOVE", "account#", Some(image("user-1", Some(1))), None),
        ]);

        let summary = handle_account_stream(event, &publisher, NOW).await.unwrap();

        assert_eq!(
            summary,
            StreamSummary {
                published: 0,
                skipped: 2
            }
        );
        assert!(publisher.published().is_empty());
    }

    #[tokio::test]
    async fn test_missing_last_login_fails() {
        let publisher = RecordingPublisher::default();
        let event = event(vec![record(
            "MODIFY",
            "account#",
            None,
            Some(image("user-1", None)),
        )]);

        let result = handle_account_stream(event, &publisher, NOW).await;

        assert!(matches!(
            result,
            Err(HandlerError::Account(AccountError::MissingAttribute {
                attribute: "last_login",
                ..
            }))
        ));
    }

    #[tokio::test]
    async fn test_unknown_event_name_fails() {
        let publisher = RecordingPublisher::default();
        let event = event(vec![record(
            "UPSERT",
            "account#",
            None,
            Some(image("user-1", Some(1))),
        )]);

        let result = handle_account_stream(event, &publisher, NOW).await;

        assert!(matches!(
            result,
            Err(HandlerError::Account(AccountError::UnknownEventType(name))) if name == "UPSERT"
        ));
    }

    #[tokio::test]
    async fn test_publish_failure_aborts_batch() {
        let publisher = RecordingPublisher::failing();
        let event = event(vec![record(
            "MODIFY",
            "account#",
            Some(image("user-1", Some(1))),
            Some(image("user-1", Some(2))),
        )]);

        let result = handle_account_stream(event, &publisher, NOW).await;

        assert!(matches!(result, Err(HandlerError::Publish(_))));
    }
}
