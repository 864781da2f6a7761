//! Data mapper: turns mappable items into store operations.

use std::fmt;
use std::sync::Arc;

use dynamodel_core::mapper::{
    derive_key_schema, extract_key, plan_update, prepare_item, Mappable, MapperError, OnMissing,
    Result,
};
use dynamodel_core::schema::SchemaDescriptor;
use dynamodel_core::storage::{Store, TableDefinition};
use dynamodel_core::Attributes;

/// Maps schema-carrying items onto a [`Store`].
///
/// Every operation first checks that the item declares a table and a
/// schema; items that do not (a plain `Record`) fail with
/// [`MapperError::MissingTableName`] or [`MapperError::MissingSchema`].
#[derive(Clone)]
pub struct DataMapper {
    store: Arc<dyn Store>,
    table_prefix: String,
}

impl DataMapper {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            table_prefix: String::new(),
        }
    }

    pub fn with_table_prefix(mut self, table_prefix: impl Into<String>) -> Self {
        self.table_prefix = table_prefix.into();
        self
    }

    /// Resolves a model's table name against the configured prefix.
    pub fn table_name(&self, table_name: &str) -> String {
        format!("{}{}", self.table_prefix, table_name)
    }

    fn target<'a, M>(&self, item: &'a M) -> Result<(String, &'a SchemaDescriptor)>
    where
        M: Mappable + ?Sized,
    {
        let table_name = item.table_name().ok_or(MapperError::MissingTableName)?;
        let schema = item.schema().ok_or(MapperError::MissingSchema)?;
        Ok((self.table_name(table_name), schema))
    }

    /// Writes the whole item, replacing whatever is stored under its key.
    ///
    /// Returns the attributes as written, defaults included.
    pub async fn put<M>(&self, item: &M) -> Result<Attributes>
    where
        M: Mappable + Sync + ?Sized,
    {
        let (table_name, schema) = self.target(item)?;
        let key_schema = derive_key_schema(schema)?;
        let prepared = prepare_item(schema, item.attributes())?;
        let key = extract_key(&key_schema, &prepared)?;

        tracing::debug!(table = %table_name, key = %key, "put item");
        self.store.put_item(&table_name, &key, &prepared).await?;
        Ok(prepared)
    }

    /// Upserts the item.
    ///
    /// Absent attributes with a default provider are generated first, so an
    /// item without its hash key gets one. `on_missing` decides whether
    /// declared attributes the item lacks are left alone or removed.
    /// Returns every attribute of the stored item after the update.
    pub async fn update<M>(&self, item: &M, on_missing: OnMissing) -> Result<Attributes>
    where
        M: Mappable + Sync + ?Sized,
    {
        let (table_name, schema) = self.target(item)?;
        let key_schema = derive_key_schema(schema)?;
        let prepared = prepare_item(schema, item.attributes())?;
        let key = extract_key(&key_schema, &prepared)?;
        let update = plan_update(schema, &key, &prepared, on_missing);

        tracing::debug!(
            table = %table_name,
            key = %key,
            set = update.set.len(),
            remove = update.remove.len(),
            "update item"
        );
        let stored = self.store.update_item(&table_name, &key, &update).await?;
        Ok(stored)
    }

    /// Reads the item whose key attributes match those of `item`.
    pub async fn get<M>(&self, item: &M) -> Result<Option<Attributes>>
    where
        M: Mappable + Sync + ?Sized,
    {
        let (table_name, schema) = self.target(item)?;
        let key_schema = derive_key_schema(schema)?;
        let key = extract_key(&key_schema, item.attributes())?;

        tracing::debug!(table = %table_name, key = %key, "get item");
        let found = self.store.get_item(&table_name, &key).await?;
        Ok(found)
    }

    /// Deletes the item whose key attributes match those of `item`,
    /// returning the attributes it had.
    pub async fn delete<M>(&self, item: &M) -> Result<Option<Attributes>>
    where
        M: Mappable + Sync + ?Sized,
    {
        let (table_name, schema) = self.target(item)?;
        let key_schema = derive_key_schema(schema)?;
        let key = extract_key(&key_schema, item.attributes())?;

        tracing::debug!(table = %table_name, key = %key, "delete item");
        let deleted = self.store.delete_item(&table_name, &key).await?;
        Ok(deleted)
    }

    /// Creates the table for a schema when it does not exist.
    ///
    /// Returns `true` when the table was created.
    pub async fn ensure_table_exists(
        &self,
        table_name: &str,
        schema: &SchemaDescriptor,
    ) -> Result<bool> {
        let key_schema = derive_key_schema(schema)?;
        let table = TableDefinition::new(self.table_name(table_name), key_schema);

        let created = self.store.ensure_table(&table).await?;
        if created {
            tracing::info!(table = %table.table_name, "created table");
        }
        Ok(created)
    }
}

impl fmt::Debug for DataMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataMapper")
            .field("table_prefix", &self.table_prefix)
            .finish_non_exhaustive()
    }
}
