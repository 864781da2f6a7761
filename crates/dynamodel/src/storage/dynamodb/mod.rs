//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the `Store`
//! trait using `aws-sdk-dynamodb`.

mod client;
mod conversions;
mod error;
mod store;

pub use client::create_client;
pub use store::DynamoDbStore;
