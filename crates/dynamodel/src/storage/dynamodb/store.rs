//! DynamoDB store implementation.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ReturnValue,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;

use dynamodel_core::schema::AttributeType;
use dynamodel_core::storage::{
    ItemKey, ItemUpdate, KeyAttribute, Result, Store, StoreError, TableDefinition,
};
use dynamodel_core::Attributes;

use super::client::create_client;
use super::conversions::{
    attributes_to_item, build_update_expression, item_to_attributes, key_to_item,
};
use super::error::{
    map_create_table_error, map_delete_item_error, map_describe_table_error, map_get_item_error,
    map_put_item_error, map_update_item_error,
};
use crate::config::ConnectionConfig;

const TABLE_ACTIVE_MAX_ATTEMPTS: usize = 60;
const TABLE_ACTIVE_DELAY: Duration = Duration::from_secs(2);

/// DynamoDB-based store implementation.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a new store from connection configuration.
    ///
    /// Uses the AWS SDK default credential chain.
    pub async fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(create_client(config).await)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Returns whether the table exists and is active.
    async fn table_active(&self, table_name: &str) -> Result<Option<bool>> {
        match self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
        {
            Ok(response) => {
                let active = matches!(
                    response.table().and_then(|t| t.table_status()),
                    Some(TableStatus::Active)
                );
                Ok(Some(active))
            }
            Err(err) => match map_describe_table_error(err) {
                None => Ok(None),
                Some(err) => Err(err),
            },
        }
    }

    async fn wait_for_table_active(&self, table_name: &str) -> Result<()> {
        for _ in 0..TABLE_ACTIVE_MAX_ATTEMPTS {
            if self.table_active(table_name).await? == Some(true) {
                return Ok(());
            }
            tokio::time::sleep(TABLE_ACTIVE_DELAY).await;
        }

        Err(StoreError::TableActivationTimeout {
            table_name: table_name.to_string(),
        })
    }

    async fn create_table(&self, table: &TableDefinition) -> Result<bool> {
        let mut key_schema = vec![key_schema_element(&table.key_schema.hash, KeyType::Hash)?];
        let mut attribute_definitions = vec![attribute_definition(&table.key_schema.hash)?];

        if let Some(range) = &table.key_schema.range {
            key_schema.push(key_schema_element(range, KeyType::Range)?);
            attribute_definitions.push(attribute_definition(range)?);
        }

        let created = self
            .client
            .create_table()
            .table_name(&table.table_name)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions))
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        match created {
            Ok(_) => Ok(true),
            Err(err) => match map_create_table_error(err) {
                None => Ok(false),
                Some(err) => Err(err),
            },
        }
    }
}

fn to_scalar_type(attribute_type: AttributeType) -> Result<ScalarAttributeType> {
    match attribute_type {
        AttributeType::String => Ok(ScalarAttributeType::S),
        AttributeType::Number => Ok(ScalarAttributeType::N),
        other => Err(StoreError::InvalidData(format!(
            "{} cannot be used as a key type",
            other
        ))),
    }
}

fn key_schema_element(attribute: &KeyAttribute, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(&attribute.name)
        .key_type(key_type)
        .build()
        .map_err(|e| StoreError::InvalidData(e.to_string()))
}

fn attribute_definition(attribute: &KeyAttribute) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&attribute.name)
        .attribute_type(to_scalar_type(attribute.attribute_type)?)
        .build()
        .map_err(|e| StoreError::InvalidData(e.to_string()))
}

#[async_trait]
impl Store for DynamoDbStore {
    async fn put_item(&self, table_name: &str, key: &ItemKey, item: &Attributes) -> Result<()> {
        let mut item = attributes_to_item(item);
        item.extend(key_to_item(key));

        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, table_name))?;

        Ok(())
    }

    async fn update_item(
        &self,
        table_name: &str,
        key: &ItemKey,
        update: &ItemUpdate,
    ) -> Result<Attributes> {
        let expression = build_update_expression(update);

        let result = self
            .client
            .update_item()
            .table_name(table_name)
            .set_key(Some(key_to_item(key)))
            .set_update_expression(expression.expression.clone())
            .set_expression_attribute_names(expression.names())
            .set_expression_attribute_values(expression.values())
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, table_name))?;

        match result.attributes {
            Some(attributes) => item_to_attributes(&attributes),
            None => Ok(key.to_attributes()),
        }
    }

    async fn get_item(&self, table_name: &str, key: &ItemKey) -> Result<Option<Attributes>> {
        let result = self
            .client
            .get_item()
            .table_name(table_name)
            .set_key(Some(key_to_item(key)))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, table_name))?;

        match result.item {
            Some(item) => Ok(Some(item_to_attributes(&item)?)),
            None => Ok(None),
        }
    }

    async fn delete_item(&self, table_name: &str, key: &ItemKey) -> Result<Option<Attributes>> {
        let result = self
            .client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key_to_item(key)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, table_name))?;

        match result.attributes {
            Some(item) => Ok(Some(item_to_attributes(&item)?)),
            None => Ok(None),
        }
    }

    async fn ensure_table(&self, table: &TableDefinition) -> Result<bool> {
        let created = match self.table_active(&table.table_name).await? {
            Some(true) => return Ok(false),
            Some(false) => false,
            None => self.create_table(table).await?,
        };
        self.wait_for_table_active(&table.table_name).await?;
        Ok(created)
    }
}
