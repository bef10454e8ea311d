//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to [`AwsError`].

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_write_item::BatchWriteItemError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::list_tables::ListTablesError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;

use crate::error::AwsError;

const THROUGHPUT_EXCEEDED: &str = "Throughput exceeded, please retry";
const REQUEST_LIMIT_EXCEEDED: &str = "Request limit exceeded, please retry";
const INTERNAL_SERVER_ERROR: &str = "DynamoDB internal server error";

fn table_not_found(operation: &'static str, table_name: &str) -> AwsError {
    AwsError::service(operation, format!("Table not found: {table_name}"))
}

/// Map a GetItem SDK error to AwsError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "GetItem";
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(OP, table_name),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            AwsError::service(OP, THROUGHPUT_EXCEEDED)
        }
        GetItemError::RequestLimitExceeded(_) => AwsError::service(OP, REQUEST_LIMIT_EXCEEDED),
        GetItemError::InternalServerError(_) => AwsError::service(OP, INTERNAL_SERVER_ERROR),
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a Query SDK error to AwsError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "Query";
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => table_not_found(OP, table_name),
        QueryError::ProvisionedThroughputExceededException(_) => {
            AwsError::service(OP, THROUGHPUT_EXCEEDED)
        }
        QueryError::RequestLimitExceeded(_) => AwsError::service(OP, REQUEST_LIMIT_EXCEEDED),
        QueryError::InternalServerError(_) => AwsError::service(OP, INTERNAL_SERVER_ERROR),
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a PutItem SDK error to AwsError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "PutItem";
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => table_not_found(OP, table_name),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            AwsError::service(OP, THROUGHPUT_EXCEEDED)
        }
        PutItemError::RequestLimitExceeded(_) => AwsError::service(OP, REQUEST_LIMIT_EXCEEDED),
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            AwsError::service(OP, "Item collection size limit exceeded")
        }
        PutItemError::TransactionConflictException(_) => {
            AwsError::service(OP, "Transaction conflict, please retry")
        }
        PutItemError::InternalServerError(_) => AwsError::service(OP, INTERNAL_SERVER_ERROR),
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a DeleteItem SDK error to AwsError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "DeleteItem";
    match err.into_service_error() {
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(OP, table_name),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            AwsError::service(OP, THROUGHPUT_EXCEEDED)
        }
        DeleteItemError::RequestLimitExceeded(_) => AwsError::service(OP, REQUEST_LIMIT_EXCEEDED),
        DeleteItemError::InternalServerError(_) => AwsError::service(OP, INTERNAL_SERVER_ERROR),
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a BatchWriteItem SDK error to AwsError.
pub fn map_batch_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchWriteItemError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "BatchWriteItem";
    match err.into_service_error() {
        BatchWriteItemError::ResourceNotFoundException(_) => table_not_found(OP, table_name),
        BatchWriteItemError::ProvisionedThroughputExceededException(_) => {
            AwsError::service(OP, THROUGHPUT_EXCEEDED)
        }
        BatchWriteItemError::RequestLimitExceeded(_) => {
            AwsError::service(OP, REQUEST_LIMIT_EXCEEDED)
        }
        BatchWriteItemError::InternalServerError(_) => {
            AwsError::service(OP, INTERNAL_SERVER_ERROR)
        }
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a TransactWriteItems SDK error to AwsError.
pub fn map_transact_write_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<TransactWriteItemsError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "TransactWriteItems";
    match err.into_service_error() {
        TransactWriteItemsError::ResourceNotFoundException(_) => table_not_found(OP, table_name),
        TransactWriteItemsError::TransactionCanceledException(e) => AwsError::service(
            OP,
            format!(
                "Transaction canceled: {}",
                e.message().unwrap_or("no reason given")
            ),
        ),
        TransactWriteItemsError::RequestLimitExceeded(_) => {
            AwsError::service(OP, REQUEST_LIMIT_EXCEEDED)
        }
        TransactWriteItemsError::InternalServerError(_) => {
            AwsError::service(OP, INTERNAL_SERVER_ERROR)
        }
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a CreateTable SDK error to AwsError.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
    table_name: &str,
) -> AwsError {
    const OP: &str = "CreateTable";
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => {
            AwsError::service(OP, format!("Table already exists: {table_name}"))
        }
        CreateTableError::LimitExceededException(_) => {
            AwsError::service(OP, "Too many tables being created at once")
        }
        CreateTableError::InternalServerError(_) => AwsError::service(OP, INTERNAL_SERVER_ERROR),
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}

/// Map a DescribeTable SDK error. Returns `None` when the table does not exist.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> Option<AwsError> {
    const OP: &str = "DescribeTable";
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => None,
        DescribeTableError::InternalServerError(_) => {
            Some(AwsError::service(OP, INTERNAL_SERVER_ERROR))
        }
        err => Some(AwsError::service(OP, format!("{:?}", err))),
    }
}

/// Map a ListTables SDK error to AwsError.
pub fn map_list_tables_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<ListTablesError, R>,
) -> AwsError {
    const OP: &str = "ListTables";
    match err.into_service_error() {
        ListTablesError::InternalServerError(_) => AwsError::service(OP, INTERNAL_SERVER_ERROR),
        err => AwsError::service(OP, format!("{:?}", err)),
    }
}
