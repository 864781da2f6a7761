//! Pure logic for dynamodel.
//!
//! This crate holds everything that does not touch the network: schema
//! descriptors and the validation rules attached to them, the planning
//! steps the data mapper runs before a write, and the [`storage::Store`]
//! trait that concrete backends implement in the `dynamodel` crate.

pub mod mapper;
pub mod schema;
pub mod storage;

pub use serde_json::Value;

/// Attribute values of a single item, keyed by attribute name.
pub type Attributes = serde_json::Map<String, Value>;
