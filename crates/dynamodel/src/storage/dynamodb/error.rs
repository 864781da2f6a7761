//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StoreError` from `dynamodel_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use dynamodel_core::storage::StoreError;

fn table_not_found(table_name: &str) -> StoreError {
    StoreError::TableNotFound {
        table_name: table_name.to_string(),
    }
}

/// Map a generic connection error to StoreError.
pub fn map_connection_error(err: impl std::fmt::Display) -> StoreError {
    StoreError::ConnectionFailed(err.to_string())
}

/// Transport failures never reach the service, so they carry no service
/// error to match on.
fn connection_failure<E, R>(err: &SdkError<E, R>) -> Option<StoreError>
where
    E: std::error::Error + 'static,
    R: Debug,
{
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            tracing::warn!("DynamoDB unreachable: {}", DisplayErrorContext(err));
            Some(map_connection_error(DisplayErrorContext(err)))
        }
        _ => None,
    }
}

fn throttled(table_name: &str, message: &str) -> StoreError {
    tracing::warn!(table = %table_name, "{}", message);
    StoreError::Throttled(message.to_string())
}

/// Map a GetItem SDK error to StoreError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_failure(&err) {
        return err;
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            throttled(table_name, "Throughput exceeded, please retry")
        }
        GetItemError::RequestLimitExceeded(_) => {
            throttled(table_name, "Request limit exceeded, please retry")
        }
        GetItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StoreError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_failure(&err) {
        return err;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(e) => {
            StoreError::ConditionFailed(format!("PutItem: {:?}", e.message()))
        }
        PutItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            throttled(table_name, "Throughput exceeded, please retry")
        }
        PutItemError::RequestLimitExceeded(_) => {
            throttled(table_name, "Request limit exceeded, please retry")
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map an UpdateItem SDK error to StoreError.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_failure(&err) {
        return err;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(e) => {
            StoreError::ConditionFailed(format!("UpdateItem: {:?}", e.message()))
        }
        UpdateItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        UpdateItemError::ProvisionedThroughputExceededException(_) => {
            throttled(table_name, "Throughput exceeded, please retry")
        }
        UpdateItemError::RequestLimitExceeded(_) => {
            throttled(table_name, "Request limit exceeded, please retry")
        }
        UpdateItemError::ItemCollectionSizeLimitExceededException(_) => {
            StoreError::QueryFailed("Item collection size limit exceeded".to_string())
        }
        UpdateItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        UpdateItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("UpdateItem failed: {:?}", err)),
    }
}

/// Map a DeleteItem SDK error to StoreError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
    table_name: &str,
) -> StoreError {
    if let Some(err) = connection_failure(&err) {
        return err;
    }
    match err.into_service_error() {
        DeleteItemError::ConditionalCheckFailedException(e) => {
            StoreError::ConditionFailed(format!("DeleteItem: {:?}", e.message()))
        }
        DeleteItemError::ResourceNotFoundException(_) => table_not_found(table_name),
        DeleteItemError::ProvisionedThroughputExceededException(_) => {
            throttled(table_name, "Throughput exceeded, please retry")
        }
        DeleteItemError::RequestLimitExceeded(_) => {
            throttled(table_name, "Request limit exceeded, please retry")
        }
        DeleteItemError::TransactionConflictException(_) => {
            StoreError::QueryFailed("Transaction conflict, please retry".to_string())
        }
        DeleteItemError::InternalServerError(_) => {
            StoreError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => StoreError::QueryFailed(format!("DeleteItem failed: {:?}", err)),
    }
}

/// Map a DescribeTable SDK error.
///
/// Returns `None` when the table does not exist, which callers treat as a
/// normal outcome rather than a failure.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> Option<StoreError> {
    if let Some(err) = connection_failure(&err) {
        return Some(err);
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => None,
        DescribeTableError::InternalServerError(_) => Some(StoreError::QueryFailed(
            "DynamoDB internal server error".to_string(),
        )),
        err => Some(StoreError::QueryFailed(format!(
            "DescribeTable failed: {:?}",
            err
        ))),
    }
}

/// Map a CreateTable SDK error.
///
/// Returns `None` when another client is already creating the table.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> Option<StoreError> {
    if let Some(err) = connection_failure(&err) {
        return Some(err);
    }
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => None,
        CreateTableError::LimitExceededException(_) => Some(StoreError::Throttled(
            "Table operation limit exceeded, please retry".to_string(),
        )),
        CreateTableError::InternalServerError(_) => Some(StoreError::QueryFailed(
            "DynamoDB internal server error".to_string(),
        )),
        err => Some(StoreError::QueryFailed(format!(
            "CreateTable failed: {:?}",
            err
        ))),
    }
}
