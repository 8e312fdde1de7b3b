//! File parse command
//!
//! Destructive workflow: logs in with the AppRole pair, renders the target
//! file in place, and auto-revokes the token it created. On success the only
//! outputs are a log line and the rewritten file on disk.

use anyhow::Result;
use tracing::info;

use crate::cli::{Cli, ParseArgs};

pub async fn run(args: &ParseArgs, cli: &Cli) -> Result<()> {
    info!("Parse file...");
    let delims = super::delimiters(&args.left_delim, &args.right_delim);
    let mut session = super::connect(cli).await?.with_delimiters(delims);

    session
        .render_file(
            args.role_id.as_deref().unwrap_or_default(),
            args.secret_id.as_deref().unwrap_or_default(),
            &args.path,
            &args.file,
        )
        .await?;

    Ok(())
}
