//! Command handlers

pub mod parse;
pub mod secret;
pub mod token;

use anyhow::{Context, Result};
use vault_helper_client::{ClientConfig, Delimiters, Session, VaultClient};

use crate::cli::Cli;

/// Build a client from the global flags, gate on the readiness probe, and
/// wrap it in a fresh session. Every command starts here; nothing proceeds
/// while the service is unready.
pub(crate) async fn connect(cli: &Cli) -> Result<Session> {
    let addr = cli
        .addr
        .as_deref()
        .context("Vault address is required (--addr or VAULT_ADDR)")?;

    let config = ClientConfig::new(addr, cli.insecure)?;
    let client = VaultClient::new(config)?;
    client.ensure_ready().await?;

    Ok(Session::new(client))
}

/// Build the delimiter pair from command flags
pub(crate) fn delimiters(left: &str, right: &str) -> Delimiters {
    Delimiters {
        left: left.to_string(),
        right: right.to_string(),
    }
}
