//! Table schemas and key conditions.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ScalarAttributeType,
    StreamSpecification, StreamViewType,
};
use portfolio_core::storage::keys::{PARTITION_KEY, SORT_KEY};

use crate::error::{AwsError, Result};

/// A key attribute and its scalar type.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: ScalarAttributeType,
}

impl KeyAttribute {
    /// A string-typed key attribute.
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attribute_type: ScalarAttributeType::S,
        }
    }
}

/// Key schema used when creating a table. Billing is always on-demand.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub partition_key: KeyAttribute,
    pub sort_key: Option<KeyAttribute>,
    pub stream_view_type: Option<StreamViewType>,
}

impl Default for TableSchema {
    /// `pk` (S, HASH) + `sk` (S, RANGE), no stream.
    fn default() -> Self {
        Self {
            partition_key: KeyAttribute::string(PARTITION_KEY),
            sort_key: Some(KeyAttribute::string(SORT_KEY)),
            stream_view_type: None,
        }
    }
}

impl TableSchema {
    /// Enables a stream with the given view type.
    pub fn with_stream(mut self, view_type: StreamViewType) -> Self {
        self.stream_view_type = Some(view_type);
        self
    }

    pub(crate) fn key_schema(&self) -> Result<Vec<KeySchemaElement>> {
        let mut elements = vec![key_element(&self.partition_key, KeyType::Hash)?];
        if let Some(sk) = &self.sort_key {
            elements.push(key_element(sk, KeyType::Range)?);
        }
        Ok(elements)
    }

    pub(crate) fn attribute_definitions(&self) -> Result<Vec<AttributeDefinition>> {
        std::iter::once(&self.partition_key)
            .chain(self.sort_key.as_ref())
            .map(|key| {
                AttributeDefinition::builder()
                    .attribute_name(&key.name)
                    .attribute_type(key.attribute_type.clone())
                    .build()
                    .map_err(|e| AwsError::InvalidInput(e.to_string()))
            })
            .collect()
    }

    pub(crate) fn stream_specification(&self) -> Result<Option<StreamSpecification>> {
        self.stream_view_type
            .as_ref()
            .map(|view_type| {
                StreamSpecification::builder()
                    .stream_enabled(true)
                    .stream_view_type(view_type.clone())
                    .build()
                    .map_err(|e| AwsError::InvalidInput(e.to_string()))
            })
            .transpose()
    }
}

fn key_element(key: &KeyAttribute, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&key.name)
        .key_type(key_type)
        .build()
        .map_err(|e| AwsError::InvalidInput(e.to_string()))
}

/// A Query key condition with its placeholder names and values.
///
/// ```ignore
/// let condition = KeyCondition::new("#uid = :uid")
///     .name("#uid", "user_id")
///     .string_value(":uid", "550e8400");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyCondition {
    expression: String,
    names: HashMap<String, String>,
    values: HashMap<String, AttributeValue>,
}

impl KeyCondition {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Default::default()
        }
    }

    /// Matches every item in a partition.
    pub fn partition(pk: &str) -> Self {
        Self::new(format!("{PARTITION_KEY} = :pk")).string_value(":pk", pk)
    }

    /// Matches items in a partition whose sort key starts with `prefix`.
    pub fn begins_with(pk: &str, prefix: &str) -> Self {
        Self::new(format!(
            "{PARTITION_KEY} = :pk and begins_with({SORT_KEY}, :beginsWith)"
        ))
        .string_value(":pk", pk)
        .string_value(":beginsWith", prefix)
    }

    /// Adds an expression attribute name placeholder.
    pub fn name(mut self, placeholder: impl Into<String>, attribute: impl Into<String>) -> Self {
        self.names.insert(placeholder.into(), attribute.into());
        self
    }

    /// Adds an expression attribute value placeholder.
    pub fn value(mut self, placeholder: impl Into<String>, value: AttributeValue) -> Self {
        self.values.insert(placeholder.into(), value);
        self
    }

    pub fn string_value(self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.value(placeholder, AttributeValue::S(value.into()))
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        String,
        Option<HashMap<String, String>>,
        Option<HashMap<String, AttributeValue>>,
    ) {
        let names = (!self.names.is_empty()).then_some(self.names);
        let values = (!self.values.is_empty()).then_some(self.values);
        (self.expression, names, values)
    }
}
