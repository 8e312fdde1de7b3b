//! Secret fetch command

use anyhow::Result;
use tracing::info;

use crate::cli::{Cli, SecretCommands};

pub async fn run(cmd: &SecretCommands, cli: &Cli) -> Result<()> {
    match cmd {
        SecretCommands::Get(args) => {
            info!("Fetch secret...");
            let delims = super::delimiters(&args.left_delim, &args.right_delim);
            let mut session = super::connect(cli).await?.with_delimiters(delims);
            let rendered = session
                .fetch_secret(
                    args.token.as_deref().unwrap_or_default(),
                    &args.path,
                    &args.selector,
                )
                .await?;
            println!("{rendered}");
        }
    }

    Ok(())
}
