//! Token lifecycle commands

use anyhow::Result;
use tracing::info;

use crate::cli::{Cli, TokenCommands};

pub async fn run(cmd: &TokenCommands, cli: &Cli) -> Result<()> {
    match cmd {
        TokenCommands::Create(args) => {
            info!("Create token...");
            let mut session = super::connect(cli).await?;
            let token = session
                .create_token(
                    args.role_id.as_deref().unwrap_or_default(),
                    args.secret_id.as_deref().unwrap_or_default(),
                )
                .await?;
            println!("{token}");
        }

        TokenCommands::Renew(args) => {
            info!("Renew token...");
            let mut session = super::connect(cli).await?;
            let token = session
                .renew_token(args.token.as_deref().unwrap_or_default())
                .await?;
            println!("{token}");
        }

        TokenCommands::Revoke(args) => {
            info!("Revoke token...");
            let mut session = super::connect(cli).await?;
            session
                .revoke_token(args.token.as_deref().unwrap_or_default())
                .await?;
        }
    }

    Ok(())
}
