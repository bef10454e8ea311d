//! Typed wrappers around the managed AWS services the portfolio services use.
//!
//! Each wrapper is bound to one resource (a table, a queue, a topic) so a
//! caller cannot write to the wrong one by accident. SDK errors are mapped
//! into [`AwsError`] with the operation that failed. The [`repository`]
//! module adapts the wrappers to the traits defined in `portfolio_core`.

pub mod config;
pub mod dynamodb;
mod error;
pub mod repository;
pub mod secrets;
pub mod sns;
pub mod sqs;

#[cfg(test)]
mod test_http;

pub use config::{AwsClients, Settings};
pub use error::{AwsError, Result};
