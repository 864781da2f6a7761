use thiserror::Error;

use crate::schema::AttributeType;
use crate::storage::StoreError;

/// Errors raised by the data mapper.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapperError {
    #[error("The provided item did not declare a table name")]
    MissingTableName,
    #[error("The provided item did not declare a schema")]
    MissingSchema,
    #[error("Schema declares no HASH key attribute")]
    MissingHashKey,
    #[error("Schema declares more than one HASH key attribute: {first}, {second}")]
    MultipleHashKeys { first: String, second: String },
    #[error("Schema declares more than one RANGE key attribute: {first}, {second}")]
    MultipleRangeKeys { first: String, second: String },
    #[error("Key attribute '{attribute}' must be String or Number, found {attribute_type}")]
    UnsupportedKeyType {
        attribute: String,
        attribute_type: AttributeType,
    },
    #[error("Key attribute '{attribute}' has no value")]
    MissingKeyValue { attribute: String },
    #[error("Attribute '{attribute}' cannot be stored as {expected}: {value}")]
    TypeMismatch {
        attribute: String,
        expected: AttributeType,
        value: String,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for mapper operations.
pub type Result<T> = std::result::Result<T, MapperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_schema_display() {
        assert_eq!(
            MapperError::MissingSchema.to_string(),
            "The provided item did not declare a schema"
        );
    }

    #[test]
    fn test_type_mismatch_display() {
        let error = MapperError::TypeMismatch {
            attribute: "cpf".to_string(),
            expected: AttributeType::Number,
            value: "\"abc\"".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Attribute 'cpf' cannot be stored as Number: \"abc\""
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error: MapperError = StoreError::QueryFailed("boom".to_string()).into();
        assert_eq!(error.to_string(), "Query failed: boom");
    }
}
