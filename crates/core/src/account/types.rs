use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::keys;

/// A user account row in the account table.
///
/// Field names serialize to the stored attribute names. Clients receive
/// [`AccountView`] instead, which hides the keys and the update timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub pk: String,
    pub sk: String,
    pub user_id: String,
    /// Unix seconds of the most recent login, 0 if the user never logged in.
    #[serde(default)]
    pub last_login: i64,
    /// Unix seconds the account was created.
    #[serde(rename = "exp")]
    pub created: i64,
    pub updated: i64,
}

impl Account {
    /// Creates a new account with a random user id, stamped with the current time.
    pub fn new() -> Self {
        Self::with_user_id(Uuid::new_v4().to_string(), Utc::now().timestamp())
    }

    /// Creates an account for a known user id at the given time.
    pub fn with_user_id(user_id: impl Into<String>, now: i64) -> Self {
        let user_id = user_id.into();
        Self {
            pk: keys::account_pk(&user_id),
            sk: keys::account_sk().to_string(),
            user_id,
            last_login: 0,
            created: now,
            updated: now,
        }
    }

    /// Stamps a login at `now`.
    pub fn record_login(&mut self, now: i64) {
        self.last_login = now;
        self.updated = now;
    }

    /// Returns the client-facing representation.
    pub fn view(&self) -> AccountView {
        AccountView::from(self)
    }
}

impl Default for Account {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-facing JSON form of an [`Account`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub user_id: String,
    pub last_login: i64,
    pub exp: i64,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.user_id.clone(),
            last_login: account.last_login,
            exp: account.created,
        }
    }
}
