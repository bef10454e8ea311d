//! Functional core for the portfolio account services.
//!
//! Records stored in DynamoDB, the notification exchanged over SNS/SQS, the
//! login retention rule and the traits the AWS adapters implement. Nothing in
//! this crate performs I/O.

pub mod account;
pub mod case;
pub mod naming;
pub mod publish;
pub mod stats;
pub mod storage;
