use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table '{table_name}' not found")]
    TableNotFound { table_name: String },
    #[error("Timeout waiting for table '{table_name}' to become active")]
    TableActivationTimeout { table_name: String },
    #[error("Condition check failed: {0}")]
    ConditionFailed(String),
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_not_found_display() {
        let error = StoreError::TableNotFound {
            table_name: "accounts".to_string(),
        };
        assert_eq!(error.to_string(), "Table 'accounts' not found");
    }

    #[test]
    fn test_throttled_display() {
        let error = StoreError::Throttled("Throughput exceeded, please retry".to_string());
        assert_eq!(
            error.to_string(),
            "Request throttled: Throughput exceeded, please retry"
        );
    }

    #[test]
    fn test_activation_timeout_display() {
        let error = StoreError::TableActivationTimeout {
            table_name: "accounts".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Timeout waiting for table 'accounts' to become active"
        );
    }

    #[test]
    fn test_invalid_data_display() {
        let error = StoreError::InvalidData("binary attributes are not supported".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid data: binary attributes are not supported"
        );
    }
}
