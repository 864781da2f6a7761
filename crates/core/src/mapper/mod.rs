//! Data mapper planning.
//!
//! Pure steps the mapper runs before touching a store: resolve the key
//! schema, fill defaults, coerce values to their declared types, and plan
//! the update.

mod error;
mod operations;
mod record;
mod traits;

pub use error::{MapperError, Result};
pub use operations::{
    apply_defaults, coerce_value, derive_key_schema, extract_key, key_from_values, plan_update,
    prepare_item, OnMissing,
};
pub use record::Record;
pub use traits::Mappable;
