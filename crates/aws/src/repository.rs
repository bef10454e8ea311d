//! Adapters from the AWS wrappers to the `portfolio_core` traits.

use async_trait::async_trait;
use portfolio_core::account::{Account, AccountNotification};
use portfolio_core::naming::account_topic_name;
use portfolio_core::publish::{NotificationPublisher, PublishError};
use portfolio_core::stats::Stats;
use portfolio_core::storage::{keys, AccountRepository, StatsRepository};

use crate::dynamodb::Table;
use crate::error::Result;
use crate::sns::{Notification, TopicRegistry};

/// Account rows in the account table.
#[derive(Debug, Clone)]
pub struct DynamoDbAccountRepository {
    table: Table,
}

impl DynamoDbAccountRepository {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

#[async_trait]
impl AccountRepository for DynamoDbAccountRepository {
    async fn put_account(&self, account: &Account) -> portfolio_core::storage::Result<()> {
        Ok(self.table.put_item(account).await?)
    }

    async fn find_account(&self, user_id: &str) -> portfolio_core::storage::Result<Option<Account>> {
        Ok(self
            .table
            .find_one(&keys::account_pk(user_id), keys::account_sk())
            .await?)
    }

    async fn remove_account(&self, account: &Account) -> portfolio_core::storage::Result<()> {
        Ok(self.table.delete_item(&account.pk, &account.sk).await?)
    }
}

/// Stats log lines in the log table.
#[derive(Debug, Clone)]
pub struct DynamoDbStatsRepository {
    table: Table,
}

impl DynamoDbStatsRepository {
    pub fn new(table: Table) -> Self {
        Self { table }
    }
}

#[async_trait]
impl StatsRepository for DynamoDbStatsRepository {
    async fn put_stats(&self, stats: &Stats) -> portfolio_core::storage::Result<()> {
        Ok(self.table.put_item(stats).await?)
    }
}

/// Publishes account notifications to the stage's account topic.
#[derive(Debug, Clone)]
pub struct SnsAccountPublisher {
    notification: Notification,
}

impl SnsAccountPublisher {
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }

    /// Resolves `topic-<stage>-account` from the topics visible to the client.
    pub async fn for_stage(client: aws_sdk_sns::Client, stage: &str) -> Result<Self> {
        let registry = TopicRegistry::load(client).await?;
        let notification = registry.topic(&account_topic_name(stage))?;
        Ok(Self::new(notification))
    }

    pub fn topic(&self) -> &str {
        self.notification.topic()
    }
}

#[async_trait]
impl NotificationPublisher for SnsAccountPublisher {
    async fn publish(
        &self,
        notification: &AccountNotification,
    ) -> portfolio_core::publish::Result<String> {
        let message = notification
            .to_json()
            .map_err(|e| PublishError::Serialization(e.to_string()))?;
        Ok(self.notification.publish(&message).await?)
    }
}
