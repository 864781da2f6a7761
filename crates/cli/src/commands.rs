//! Command execution.

use anyhow::{bail, Context, Result};
use dynamodel::{Connection, ModelClass, Value};
use serde_json::json;

use crate::account;
use crate::cli::{Cli, Commands};

/// Runs the parsed command line and returns the rendered output.
pub async fn run(cli: Cli) -> Result<String> {
    let config = cli.connection_config();
    let connection = if cli.in_memory {
        tracing::debug!("using in-memory store");
        Connection::in_memory(config)
    } else {
        Connection::connect(config).await
    };

    let accounts = account::model(&connection, &cli.table)?;
    // A fresh in-memory store has no tables yet.
    if cli.in_memory {
        accounts.ensure_table().await?;
    }

    let value = execute(&accounts, cli.command).await?;
    Ok(cli.format.render(&value)?)
}

pub async fn execute(accounts: &ModelClass, command: Commands) -> Result<Value> {
    match command {
        Commands::EnsureTable => {
            let created = accounts.ensure_table().await?;
            let table = accounts.mapper().table_name(accounts.table_name());
            Ok(json!({ "table": table, "created": created }))
        }
        Commands::Validate { json } => {
            let validated = accounts.from_json(parse(&json)?)?.validate()?;
            Ok(Value::Object(validated))
        }
        Commands::Save { json } => {
            let validated = accounts.from_json(parse(&json)?)?.validate()?;
            let saved = accounts.construct(validated)?.save().await?;
            tracing::info!(id = ?saved.get("id"), "saved account");
            Ok(saved.to_json())
        }
        Commands::Get { id } => match accounts.get(id.as_str()).await? {
            Some(account) => Ok(account.to_json()),
            None => bail!("{} {} not found", accounts.class_name(), id),
        },
        Commands::Delete { id } => {
            let mut key = accounts.empty();
            key.set("id", id.as_str())?;
            match key.delete().await? {
                Some(account) => Ok(account.to_json()),
                None => bail!("{} {} not found", accounts.class_name(), id),
            }
        }
    }
}

fn parse(json: &str) -> Result<Value> {
    serde_json::from_str(json).context("Failed to parse account JSON")
}
