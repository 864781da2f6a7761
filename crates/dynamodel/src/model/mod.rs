//! Model classes built from schema descriptors.
//!
//! [`build_aggregator_model`] compiles a schema-builder function against a
//! connection and returns the resulting [`ModelClass`] together with its
//! aliases. A [`Namespace`] collects aliases across registrations when a
//! caller wants a single registry.

mod aggregator;
mod class;
mod error;
mod instance;
mod namespace;

pub use aggregator::{
    build_aggregator_model, build_aggregator_model_into, Aggregate, AggregatorOptions, MODEL_ALIAS,
};
pub use class::ModelClass;
pub use error::{ModelError, Result};
pub use instance::Instance;
pub use namespace::Namespace;
