use std::env;

/// Connection configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// AWS region (default: "us-east-1")
    pub region: String,
    /// Custom endpoint URL, e.g. for DynamoDB Local (default: none)
    pub endpoint_url: Option<String>,
    /// Prefix prepended to every table name (default: "")
    pub table_prefix: String,
}

impl ConnectionConfig {
    /// Creates a configuration for the given region with no endpoint
    /// override and no table prefix.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            table_prefix: String::new(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `AWS_ENDPOINT_URL` - Custom endpoint URL (optional)
    /// - `DYNAMODEL_TABLE_PREFIX` - Table name prefix (default: "")
    pub fn from_env() -> Self {
        Self {
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint_url: env::var("AWS_ENDPOINT_URL")
                .ok()
                .filter(|url| !url.is_empty()),
            table_prefix: env::var("DYNAMODEL_TABLE_PREFIX").unwrap_or_default(),
        }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_table_prefix(mut self, table_prefix: impl Into<String>) -> Self {
        self.table_prefix = table_prefix.into();
        self
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
