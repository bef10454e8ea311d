//! Table-bound DynamoDB wrapper.
//!
//! Items are marshaled with `serde_dynamo`, so any `Serialize` record can be
//! written and any `Deserialize` record read back.

mod error;
mod schema;
mod table;

pub use aws_sdk_dynamodb::types::AttributeValue;
pub use aws_sdk_dynamodb::Client;
pub use schema::{KeyAttribute, KeyCondition, TableSchema};
pub use table::{list_tables, Table, BATCH_WRITE_LIMIT, TRANSACTION_LIMIT};
