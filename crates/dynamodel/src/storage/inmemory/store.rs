//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use dynamodel_core::storage::{
    ItemKey, ItemUpdate, Result, Store, StoreError, TableDefinition,
};
use dynamodel_core::Attributes;

type Table = HashMap<String, Attributes>;

/// In-memory storage backend for testing.
///
/// Data is not persisted and will be lost when the last clone is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

impl InMemoryStore {
    /// Creates a new store with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn has_table(&self, table_name: &str) -> bool {
        self.tables.read().await.contains_key(table_name)
    }

    /// Number of items in a table, or `None` if the table does not exist.
    pub async fn item_count(&self, table_name: &str) -> Option<usize> {
        self.tables.read().await.get(table_name).map(HashMap::len)
    }
}

/// Stable map key for an item key.
fn storage_key(key: &ItemKey) -> String {
    Value::Object(key.to_attributes()).to_string()
}

fn table_not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound {
        table_name: table_name.to_string(),
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn put_item(&self, table_name: &str, key: &ItemKey, item: &Attributes) -> Result<()> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(table_name))?;

        let mut stored = item.clone();
        stored.extend(key.to_attributes());
        table.insert(storage_key(key), stored);
        Ok(())
    }

    async fn update_item(
        &self,
        table_name: &str,
        key: &ItemKey,
        update: &ItemUpdate,
    ) -> Result<Attributes> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(table_name))?;

        let stored = table
            .entry(storage_key(key))
            .or_insert_with(|| key.to_attributes());
        for (name, value) in &update.set {
            stored.insert(name.clone(), value.clone());
        }
        for name in &update.remove {
            stored.remove(name);
        }
        Ok(stored.clone())
    }

    async fn get_item(&self, table_name: &str, key: &ItemKey) -> Result<Option<Attributes>> {
        let tables = self.tables.read().await;
        let table = tables
            .get(table_name)
            .ok_or_else(|| table_not_found(table_name))?;
        Ok(table.get(&storage_key(key)).cloned())
    }

    async fn delete_item(&self, table_name: &str, key: &ItemKey) -> Result<Option<Attributes>> {
        let mut tables = self.tables.write().await;
        let table = tables
            .get_mut(table_name)
            .ok_or_else(|| table_not_found(table_name))?;
        Ok(table.remove(&storage_key(key)))
    }

    async fn ensure_table(&self, table: &TableDefinition) -> Result<bool> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&table.table_name) {
            return Ok(false);
        }
        tables.insert(table.table_name.clone(), Table::new());
        Ok(true)
    }
}
