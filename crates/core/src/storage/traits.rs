use async_trait::async_trait;

use crate::account::Account;
use crate::stats::Stats;

use super::Result;

/// Repository for account rows.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Upserts an account.
    async fn put_account(&self, account: &Account) -> Result<()>;

    /// Gets an account by its user id.
    async fn find_account(&self, user_id: &str) -> Result<Option<Account>>;

    /// Deletes an account.
    async fn remove_account(&self, account: &Account) -> Result<()>;
}

/// Repository for stats log lines.
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Appends a log line to the log table.
    async fn put_stats(&self, stats: &Stats) -> Result<()>;
}
