//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use dynamodel::ConnectionConfig;

/// Validate and persist accounts in a DynamoDB table.
#[derive(Debug, Parser)]
#[command(name = "dynamodel")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1", global = true)]
    pub region: String,

    /// Custom DynamoDB endpoint, e.g. DynamoDB Local.
    #[arg(long, env = "AWS_ENDPOINT_URL", global = true)]
    pub endpoint_url: Option<String>,

    /// Account table name.
    #[arg(long, env = "DYNAMODEL_TABLE", default_value = "accounts", global = true)]
    pub table: String,

    /// Prefix prepended to the table name.
    #[arg(long, env = "DYNAMODEL_TABLE_PREFIX", default_value = "", global = true)]
    pub table_prefix: String,

    /// Use a throwaway in-memory store instead of DynamoDB.
    #[arg(long, global = true)]
    pub in_memory: bool,

    /// Output format.
    #[arg(long, default_value = "pretty", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn connection_config(&self) -> ConnectionConfig {
        let mut config =
            ConnectionConfig::new(&self.region).with_table_prefix(&self.table_prefix);
        if let Some(url) = self.endpoint_url.as_deref().filter(|url| !url.is_empty()) {
            config = config.with_endpoint_url(url);
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON on one line.
    Json,
    /// Indented JSON.
    #[default]
    Pretty,
}

impl OutputFormat {
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Json => serde_json::to_string(value),
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
        }
    }
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create the account table if it does not exist.
    EnsureTable,
    /// Validate an account given as a JSON object.
    Validate {
        /// Account attributes as JSON.
        json: String,
    },
    /// Validate and save an account given as a JSON object.
    Save {
        /// Account attributes as JSON.
        json: String,
    },
    /// Get an account by ID.
    Get {
        /// Account ID.
        id: String,
    },
    /// Delete an account by ID.
    Delete {
        /// Account ID.
        id: String,
    },
}
