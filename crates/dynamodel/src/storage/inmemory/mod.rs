//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the `Store` trait
//! that keeps tables in HashMaps wrapped in `Arc<RwLock<_>>`. Operations on
//! a table that was never created fail the way DynamoDB does.
//!
//! # Example
//!
//! ```rust,ignore
//! use dynamodel::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod store;

pub use store::InMemoryStore;
