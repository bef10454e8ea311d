//! Stats queue handler.
//!
//! Consumes account notifications from the stats queue and writes a
//! retention log line whenever a user logs in on a new day.

use std::borrow::Cow;

use aws_lambda_events::event::sqs::SqsEvent;
use portfolio_core::account::AccountNotification;
use portfolio_core::stats::retention_stats;
use portfolio_core::storage::StatsRepository;
use serde::{Deserialize, Serialize};

use crate::HandlerError;

/// Outcome of one queue batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueueSummary {
    pub recorded: usize,
    pub skipped: usize,
}

/// SNS envelope wrapped around messages delivered without raw delivery.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SnsEnvelope {
    #[serde(rename = "Type")]
    kind: String,
    message: String,
}

/// Returns the notification payload, unwrapping an SNS envelope if present.
fn message_payload(body: &str) -> Cow<'_, str> {
    match serde_json::from_str::<SnsEnvelope>(body) {
        Ok(envelope) if envelope.kind == "Notification" => Cow::Owned(envelope.message),
        _ => Cow::Borrowed(body),
    }
}

/// Records a retention log line for every cross-day login in the batch.
pub async fn handle_stats_queue(
    event: SqsEvent,
    stats: &dyn StatsRepository,
    now: i64,
) -> Result<QueueSummary, HandlerError> {
    let mut summary = QueueSummary::default();

    for message in event.records {
        let body = message.body.ok_or_else(|| HandlerError::MissingBody {
            message_id: message.message_id.clone().unwrap_or_default(),
        })?;
        let payload = message_payload(&body);
        let notification = AccountNotification::from_json(&payload)?;

        match retention_stats(&notification, &payload, now)? {
            Some(log) => {
                stats.put_stats(&log).await?;
                tracing::debug!(user_id = %log.user_id, sk = %log.sk, "recorded retention");
                summary.recorded += 1;
            }
            None => {
                tracing::debug!(user_id = %notification.user_id, "same day login");
                summary.skipped += 1;
            }
        }
    }

    tracing::info!(
        recorded = summary.recorded,
        skipped = summary.skipped,
        "stats queue processed"
    );
    Ok(summary)
}
