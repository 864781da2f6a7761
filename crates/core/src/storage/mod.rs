//! Store abstraction.
//!
//! The data mapper plans every write with pure functions and then hands the
//! result to a [`Store`]. Backends live in the `dynamodel` crate.

mod error;
mod traits;
mod types;

pub use error::{Result, StoreError};
pub use traits::Store;
pub use types::{ItemKey, ItemUpdate, KeyAttribute, KeySchema, TableDefinition};
