mod error;
pub mod keys;
mod traits;

pub use error::{RepositoryError, Result};
pub use traits::{AccountRepository, StatsRepository};
