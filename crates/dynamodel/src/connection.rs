//! Connection to the backing store.

use std::fmt;
use std::sync::Arc;

use dynamodel_core::schema::Rules;
use dynamodel_core::storage::Store;

use crate::config::ConnectionConfig;
use crate::mapper::DataMapper;

/// Handle to a store plus the settings models registered on it share.
///
/// Cloning is cheap; clones share the same store.
#[derive(Clone)]
pub struct Connection {
    config: ConnectionConfig,
    rules: Rules,
    store: Arc<dyn Store>,
}

impl Connection {
    /// Connects to DynamoDB using the AWS SDK default credential chain.
    #[cfg(feature = "dynamodb")]
    pub async fn connect(config: ConnectionConfig) -> Self {
        let store = crate::storage::DynamoDbStore::from_config(&config).await;
        tracing::debug!(target = %config.target_display(), "connected");
        Self::with_store(config, Arc::new(store))
    }

    /// Connects to DynamoDB with configuration read from the environment.
    #[cfg(feature = "dynamodb")]
    pub async fn from_env() -> Self {
        Self::connect(ConnectionConfig::from_env()).await
    }

    /// Creates a connection backed by a fresh in-memory store.
    #[cfg(feature = "inmemory")]
    pub fn in_memory(config: ConnectionConfig) -> Self {
        Self::with_store(config, Arc::new(crate::storage::InMemoryStore::new()))
    }

    pub fn with_store(config: ConnectionConfig, store: Arc<dyn Store>) -> Self {
        Self {
            config,
            rules: Rules::new(),
            store,
        }
    }

    /// Replaces the rule handle schemas are built with.
    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.rules = rules;
        self
    }

    pub fn region(&self) -> &str {
        &self.config.region
    }

    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    /// A data mapper over this connection's store.
    pub fn mapper(&self) -> DataMapper {
        DataMapper::new(self.store()).with_table_prefix(self.config.table_prefix.clone())
    }
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("config", &self.config)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
