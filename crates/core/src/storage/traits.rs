use async_trait::async_trait;

use crate::Attributes;

use super::{ItemKey, ItemUpdate, Result, TableDefinition};

/// Single-table item storage used by the data mapper.
///
/// Table names arrive fully resolved (any prefix already applied).
#[async_trait]
pub trait Store: Send + Sync {
    /// Writes a whole item, replacing any item stored under the same key.
    async fn put_item(&self, table_name: &str, key: &ItemKey, item: &Attributes) -> Result<()>;

    /// Applies an update to the item under `key`, creating it when absent.
    ///
    /// Returns every attribute of the item after the update.
    async fn update_item(
        &self,
        table_name: &str,
        key: &ItemKey,
        update: &ItemUpdate,
    ) -> Result<Attributes>;

    /// Reads the item under `key`.
    async fn get_item(&self, table_name: &str, key: &ItemKey) -> Result<Option<Attributes>>;

    /// Deletes the item under `key`, returning it if it existed.
    async fn delete_item(&self, table_name: &str, key: &ItemKey) -> Result<Option<Attributes>>;

    /// Creates the table if it does not exist yet.
    ///
    /// Returns `true` when the table was created by this call.
    async fn ensure_table(&self, table: &TableDefinition) -> Result<bool>;
}
