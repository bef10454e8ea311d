use std::collections::HashMap;
use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeValue, BillingMode, Put, PutRequest, TableDescription, TableStatus,
    TransactWriteItem, WriteRequest,
};
use aws_sdk_dynamodb::Client;
use portfolio_core::storage::keys::{normalize_sort_key, PARTITION_KEY, SORT_KEY};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::{
    map_batch_write_error, map_create_table_error, map_delete_item_error,
    map_describe_table_error, map_get_item_error, map_list_tables_error, map_put_item_error,
    map_query_error, map_transact_write_error,
};
use super::schema::{KeyCondition, TableSchema};
use crate::error::{AwsError, Result};

/// Maximum number of items in a single BatchWriteItem call.
pub const BATCH_WRITE_LIMIT: usize = 25;

/// Maximum number of items in a single TransactWriteItems call.
pub const TRANSACTION_LIMIT: usize = 100;

const ACTIVE_POLL_INTERVAL: Duration = Duration::from_secs(2);
const ACTIVE_POLL_ATTEMPTS: u32 = 150;

type Item = HashMap<String, AttributeValue>;

/// A DynamoDB client bound to one table.
#[derive(Debug, Clone)]
pub struct Table {
    client: Client,
    table_name: String,
}

impl Table {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.table_name
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Creates the table and waits until it is ACTIVE.
    ///
    /// Without a schema the table is keyed on `pk`/`sk` strings. Billing is
    /// always on-demand.
    pub async fn create_table(&self, schema: Option<TableSchema>) -> Result<TableDescription> {
        let schema = schema.unwrap_or_default();

        self.client
            .create_table()
            .table_name(&self.table_name)
            .set_key_schema(Some(schema.key_schema()?))
            .set_attribute_definitions(Some(schema.attribute_definitions()?))
            .set_stream_specification(schema.stream_specification()?)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await
            .map_err(|e| map_create_table_error(e, &self.table_name))?;

        tracing::debug!(table = %self.table_name, "table created, waiting for ACTIVE");

        self.wait_for_active().await
    }

    /// Returns the table description, or `None` if the table does not exist.
    pub async fn describe(&self) -> Result<Option<TableDescription>> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(output) => Ok(output.table),
            Err(err) => match map_describe_table_error(err) {
                None => Ok(None),
                Some(err) => Err(err),
            },
        }
    }

    pub async fn exists(&self) -> Result<bool> {
        Ok(self.describe().await?.is_some())
    }

    /// Lists every table visible to this table's client.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        list_tables(&self.client).await
    }

    /// Writes an item, replacing any item with the same key.
    pub async fn put_item<T: Serialize + ?Sized>(&self, item: &T) -> Result<()> {
        let item: Item = serde_dynamo::to_item(item)?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &self.table_name))?;

        tracing::debug!(table = %self.table_name, "put item");
        Ok(())
    }

    /// Returns every item in a partition.
    pub async fn find_with_pk<T: DeserializeOwned>(&self, pk: &str) -> Result<Vec<T>> {
        self.query(None, KeyCondition::partition(pk), None).await
    }

    /// Returns up to `limit` items in a partition whose sort key starts with `prefix`.
    pub async fn find_begins_with<T: DeserializeOwned>(
        &self,
        pk: &str,
        prefix: &str,
        limit: i32,
    ) -> Result<Vec<T>> {
        self.query(None, KeyCondition::begins_with(pk, prefix), Some(limit))
            .await
    }

    /// Queries a global secondary index.
    pub async fn find_with_gsi<T: DeserializeOwned>(
        &self,
        index_name: &str,
        condition: KeyCondition,
    ) -> Result<Vec<T>> {
        self.query(Some(index_name), condition, None).await
    }

    /// Fetches a single item. An empty sort key is looked up as `#`.
    pub async fn find_one<T: DeserializeOwned>(&self, pk: &str, sk: &str) -> Result<Option<T>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(pk.to_string()))
            .key(SORT_KEY, AttributeValue::S(normalize_sort_key(sk).to_string()))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, &self.table_name))?;

        match result.item {
            Some(item) => Ok(Some(serde_dynamo::from_item(item)?)),
            None => Ok(None),
        }
    }

    /// Like [`Table::find_one`] but a missing item is an error.
    pub async fn must_find_one<T: DeserializeOwned>(&self, pk: &str, sk: &str) -> Result<T> {
        match self.find_one(pk, sk).await? {
            Some(item) => Ok(item),
            None => {
                let sk = normalize_sort_key(sk);
                tracing::error!(table = %self.table_name, pk, sk, "item not found");
                Err(AwsError::NotFound {
                    entity: "Item",
                    id: format!("{pk}/{sk}"),
                })
            }
        }
    }

    pub async fn delete_item(&self, pk: &str, sk: &str) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(pk.to_string()))
            .key(SORT_KEY, AttributeValue::S(sk.to_string()))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, &self.table_name))?;

        tracing::debug!(table = %self.table_name, pk, sk, "deleted item");
        Ok(())
    }

    /// Writes up to [`BATCH_WRITE_LIMIT`] items in one BatchWriteItem call.
    ///
    /// Items the service leaves unprocessed are reported as an error.
    pub async fn put_items_with_batch<T: Serialize>(&self, items: &[T]) -> Result<()> {
        AwsError::check_limit("BatchWriteItem", items.len(), BATCH_WRITE_LIMIT)?;
        if items.is_empty() {
            return Ok(());
        }

        let requests = items
            .iter()
            .map(|item| -> Result<WriteRequest> {
                let put = PutRequest::builder()
                    .set_item(Some(serde_dynamo::to_item(item)?))
                    .build()
                    .map_err(|e| AwsError::InvalidInput(e.to_string()))?;
                Ok(WriteRequest::builder().put_request(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .map_err(|e| map_batch_write_error(e, &self.table_name))?;

        let unprocessed: usize = output
            .unprocessed_items
            .unwrap_or_default()
            .values()
            .map(Vec::len)
            .sum();
        if unprocessed > 0 {
            tracing::error!(table = %self.table_name, unprocessed, "batch write incomplete");
            return Err(AwsError::Unprocessed {
                operation: "BatchWriteItem",
                count: unprocessed,
            });
        }

        tracing::debug!(table = %self.table_name, count = items.len(), "batch write");
        Ok(())
    }

    /// Writes up to [`TRANSACTION_LIMIT`] items atomically.
    pub async fn put_items_with_transaction<T: Serialize>(&self, items: &[T]) -> Result<()> {
        AwsError::check_limit("TransactWriteItems", items.len(), TRANSACTION_LIMIT)?;
        if items.is_empty() {
            return Ok(());
        }

        let transact_items = items
            .iter()
            .map(|item| -> Result<TransactWriteItem> {
                let put = Put::builder()
                    .table_name(&self.table_name)
                    .set_item(Some(serde_dynamo::to_item(item)?))
                    .build()
                    .map_err(|e| AwsError::InvalidInput(e.to_string()))?;
                Ok(TransactWriteItem::builder().put(put).build())
            })
            .collect::<Result<Vec<_>>>()?;

        self.client
            .transact_write_items()
            .set_transact_items(Some(transact_items))
            .send()
            .await
            .map_err(|e| map_transact_write_error(e, &self.table_name))?;

        tracing::debug!(table = %self.table_name, count = items.len(), "transaction write");
        Ok(())
    }

    async fn query<T: DeserializeOwned>(
        &self,
        index_name: Option<&str>,
        condition: KeyCondition,
        limit: Option<i32>,
    ) -> Result<Vec<T>> {
        let (expression, names, values) = condition.into_parts();

        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .set_index_name(index_name.map(str::to_string))
            .key_condition_expression(expression)
            .set_expression_attribute_names(names)
            .set_expression_attribute_values(values)
            .set_limit(limit)
            .send()
            .await
            .map_err(|e| map_query_error(e, &self.table_name))?;

        let items = result.items.unwrap_or_default();
        tracing::debug!(table = %self.table_name, count = items.len(), "query");

        items
            .into_iter()
            .map(|item| serde_dynamo::from_item(item).map_err(AwsError::from))
            .collect()
    }

    async fn wait_for_active(&self) -> Result<TableDescription> {
        for _ in 0..ACTIVE_POLL_ATTEMPTS {
            if let Some(table) = self.describe().await? {
                if table.table_status() == Some(&TableStatus::Active) {
                    return Ok(table);
                }
            }
            tokio::time::sleep(ACTIVE_POLL_INTERVAL).await;
        }

        Err(AwsError::TableActivationTimeout(self.table_name.clone()))
    }
}

/// Lists every table name, following pagination.
pub async fn list_tables(client: &Client) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut start: Option<String> = None;

    loop {
        let output = client
            .list_tables()
            .set_exclusive_start_table_name(start.take())
            .send()
            .await
            .map_err(map_list_tables_error)?;

        names.extend(output.table_names.unwrap_or_default());

        match output.last_evaluated_table_name {
            Some(last) => start = Some(last),
            None => break,
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
    use serde::Deserialize;

    use super::*;
    use crate::test_http::{dynamodb_error, ok_json, CannedHttp};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Row {
        pk: String,
        sk: String,
    }

    fn rows(count: usize) -> Vec<Row> {
        (0..count)
            .map(|i| Row {
                pk: format!("user-{i}"),
                sk: "account#".to_string(),
            })
            .collect()
    }

    fn offline_table() -> Table {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .endpoint_url("http://127.0.0.1:1")
            .build();
        Table::new(Client::from_conf(config), "portfolio")
    }

    fn canned_table(http: &CannedHttp) -> Table {
        Table::new(http.dynamodb(), "portfolio")
    }

    #[test]
    fn test_table_name() {
        assert_eq!(offline_table().name(), "portfolio");
    }

    #[tokio::test]
    async fn test_batch_limit_checked_before_request() {
        let table = offline_table();

        let result = table.put_items_with_batch(&rows(BATCH_WRITE_LIMIT + 1)).await;

        assert_eq!(
            result,
            Err(AwsError::LimitExceeded {
                operation: "BatchWriteItem",
                count: 26,
                limit: 25,
            })
        );
    }

    #[tokio::test]
    async fn test_transaction_limit_checked_before_request() {
        let table = offline_table();

        let result = table
            .put_items_with_transaction(&rows(TRANSACTION_LIMIT + 1))
            .await;

        assert_eq!(
            result,
            Err(AwsError::LimitExceeded {
                operation: "TransactWriteItems",
                count: 101,
                limit: 100,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_writes_are_noops() {
        let table = offline_table();
        let empty: Vec<Row> = Vec::new();

        assert_eq!(table.put_items_with_batch(&empty).await, Ok(()));
        assert_eq!(table.put_items_with_transaction(&empty).await, Ok(()));
    }

    #[tokio::test]
    async fn test_exists() {
        let http = CannedHttp::new(|_| {
            ok_json(serde_json::json!({
                "Table": {"TableName": "portfolio", "TableStatus": "ACTIVE"}
            }))
        });

        assert_eq!(canned_table(&http).exists().await, Ok(true));
        assert_eq!(http.sent_to("DescribeTable").len(), 1);
    }

    #[tokio::test]
    async fn test_exists_false_when_table_missing() {
        let http = CannedHttp::new(|_| dynamodb_error(400, "ResourceNotFoundException"));

        assert_eq!(canned_table(&http).exists().await, Ok(false));
    }

    #[tokio::test]
    async fn test_exists_propagates_other_errors() {
        let http = CannedHttp::new(|_| dynamodb_error(500, "InternalServerError"));

        let result = canned_table(&http).exists().await;

        assert_eq!(
            result,
            Err(AwsError::Service {
                operation: "DescribeTable",
                message: "DynamoDB internal server error".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_find_one_empty_sort_key() {
        let http = CannedHttp::new(|_| {
            ok_json(serde_json::json!({
                "Item": {"pk": {"S": "user-1"}, "sk": {"S": "#"}}
            }))
        });

        let row: Option<Row> = canned_table(&http).find_one("user-1", "").await.unwrap();

        assert_eq!(
            row,
            Some(Row {
                pk: "user-1".to_string(),
                sk: "#".to_string(),
            })
        );
        let sent = http.sent_to("GetItem");
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].json()["Key"],
            serde_json::json!({"pk": {"S": "user-1"}, "sk": {"S": "#"}})
        );
        assert_eq!(sent[0].json()["TableName"], "portfolio");
    }

    #[tokio::test]
    async fn test_find_one_missing_item() {
        let http = CannedHttp::new(|_| ok_json(serde_json::json!({})));

        let row: Option<Row> = canned_table(&http)
            .find_one("user-1", "account#")
            .await
            .unwrap();

        assert_eq!(row, None);
    }

    #[tokio::test]
    async fn test_must_find_one_not_found() {
        let http = CannedHttp::new(|_| ok_json(serde_json::json!({})));
        let table = canned_table(&http);

        let result: Result<Row> = table.must_find_one("user-1", "account#").await;
        assert_eq!(
            result,
            Err(AwsError::NotFound {
                entity: "Item",
                id: "user-1/account#".to_string(),
            })
        );

        let result: Result<Row> = table.must_find_one("user-1", "").await;
        assert_eq!(
            result,
            Err(AwsError::NotFound {
                entity: "Item",
                id: "user-1/#".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_batch_write_unprocessed_items() {
        let http = CannedHttp::new(|_| {
            ok_json(serde_json::json!({
                "UnprocessedItems": {
                    "portfolio": [
                        {"PutRequest": {"Item": {"pk": {"S": "user-1"}, "sk": {"S": "account#"}}}}
                    ]
                }
            }))
        });

        let result = canned_table(&http).put_items_with_batch(&rows(2)).await;

        assert_eq!(
            result,
            Err(AwsError::Unprocessed {
                operation: "BatchWriteItem",
                count: 1,
            })
        );
        let sent = http.sent_to("BatchWriteItem");
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].json()["RequestItems"]["portfolio"]
                .as_array()
                .map(Vec::len),
            Some(2)
        );
    }

    #[tokio::test]
    async fn test_batch_write_all_processed() {
        let http = CannedHttp::new(|_| ok_json(serde_json::json!({"UnprocessedItems": {}})));

        assert_eq!(canned_table(&http).put_items_with_batch(&rows(3)).await, Ok(()));
    }
}
