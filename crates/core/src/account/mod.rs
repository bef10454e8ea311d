mod error;
mod notification;
mod types;

pub use error::AccountError;
pub use notification::{AccountNotification, StreamEventType};
pub use types::{Account, AccountView};
