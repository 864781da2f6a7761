//! Schema-validated models persisted through a DynamoDB table mapper.
//!
//! A model is registered once with [`build_aggregator_model`], which binds a
//! schema to a [`Connection`] and returns the model class under its aliases.
//! Instances of the class can then [`validate`](Instance::validate) and
//! [`save`](Instance::save) themselves.
//!
//! ```rust,ignore
//! use dynamodel::{build_aggregator_model, AggregatorOptions, Connection, ConnectionConfig};
//! use dynamodel::schema::{uuid_v4, AttributeDescriptor, Rules, SchemaDescriptor};
//!
//! fn schema(rules: &Rules) -> SchemaDescriptor {
//!     SchemaDescriptor::new()
//!         .attribute(
//!             "id",
//!             AttributeDescriptor::string(rules.string().guid())
//!                 .hash_key()
//!                 .default_provider(uuid_v4()),
//!         )
//!         .attribute("name", AttributeDescriptor::string(rules.string().required()))
//! }
//!
//! let connection = Connection::connect(ConnectionConfig::new("us-east-1")).await;
//! let accounts = build_aggregator_model(
//!     &connection,
//!     AggregatorOptions::new("Account", "accounts", schema),
//! )?;
//!
//! let account = accounts.class().from_json(serde_json::json!({ "name": "teste" }))?;
//! account.validate()?;
//! let saved = account.save().await?;
//! assert!(saved.get("id").is_some());
//! ```

pub mod config;
pub mod connection;
pub mod mapper;
pub mod model;
pub mod storage;

pub use config::ConnectionConfig;
pub use connection::Connection;
pub use mapper::DataMapper;
pub use model::{
    build_aggregator_model, build_aggregator_model_into, Aggregate, AggregatorOptions, Instance,
    ModelClass, ModelError, Namespace, MODEL_ALIAS,
};

pub use dynamodel_core::mapper::{Mappable, MapperError, OnMissing, Record};
pub use dynamodel_core::storage::{Store, StoreError};
pub use dynamodel_core::{schema, Attributes, Value};
