//! Lambda handlers gluing the account table, the account topic and the stats
//! log table together.
//!
//! Handlers take their collaborators as `portfolio_core` traits so they can be
//! exercised without AWS. The binaries under `src/bin` wire them to the real
//! adapters from `portfolio_aws`.

mod error;
pub mod handlers;
pub mod telemetry;

pub use error::HandlerError;
