//! Schema descriptors and the validation rules attached to them.
//!
//! A schema is produced by a builder function that receives a [`Rules`]
//! handle:
//!
//! ```
//! use dynamodel_core::schema::{uuid_v4, AttributeDescriptor, Rules, SchemaDescriptor};
//!
//! fn account(rules: &Rules) -> SchemaDescriptor {
//!     SchemaDescriptor::new()
//!         .attribute(
//!             "id",
//!             AttributeDescriptor::string(rules.string().guid())
//!                 .hash_key()
//!                 .default_provider(uuid_v4()),
//!         )
//!         .attribute("name", AttributeDescriptor::string(rules.string().min(3).required()))
//! }
//!
//! let schema = account(&Rules::new());
//! assert_eq!(schema.len(), 2);
//! ```

mod error;
mod rules;
mod types;
mod validate;

pub use error::{ValidationError, ValidationReason, ValidationResult};
pub use rules::{AnyRule, BooleanRule, NumberRule, Rule, Rules, StringRule};
pub use types::{
    uuid_v4, AttributeDescriptor, AttributeType, DefaultProvider, KeyType, SchemaDescriptor,
};
pub use validate::validate_attributes;
