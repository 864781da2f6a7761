use thiserror::Error;

use dynamodel_core::mapper::MapperError;
use dynamodel_core::schema::ValidationError;

/// Errors raised by model classes and instances.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid model options: {0}")]
    InvalidOptions(String),
    #[error("{class_name} does not declare attribute '{attribute}'")]
    UndeclaredAttribute {
        class_name: String,
        attribute: String,
    },
    #[error("{class_name} can only be built from a JSON object")]
    NotAnObject { class_name: String },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Mapper(#[from] MapperError),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamodel_core::schema::ValidationReason;

    #[test]
    fn test_undeclared_attribute_display() {
        let error = ModelError::UndeclaredAttribute {
            class_name: "Account".to_string(),
            attribute: "nickname".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Account does not declare attribute 'nickname'"
        );
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let error: ModelError =
            ValidationError::new("parent", ValidationReason::NotAString).into();
        assert_eq!(error.to_string(), "\"parent\" must be a string");
    }

    #[test]
    fn test_mapper_error_is_transparent() {
        let error: ModelError = MapperError::MissingHashKey.into();
        assert_eq!(error.to_string(), "Schema declares no HASH key attribute");
    }
}
