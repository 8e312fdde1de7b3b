//! CLI argument parsing with clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// vault-helper - fetch secrets from Vault and print them, or render them
/// into template placeholders in a text file
///
/// When invoking with 'parse', a token is generated, used, and automatically
/// revoked. A token created or renewed with the 'token' commands must be
/// revoked manually with 'token revoke'.
#[derive(Parser, Debug)]
#[command(name = "vault-helper")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Vault address, like https://somewhere:8200
    #[arg(long, env = "VAULT_ADDR", global = true)]
    pub addr: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, env = "VAULT_INSECURE", global = true)]
    pub insecure: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Perform operations on a token
    #[command(subcommand)]
    Token(TokenCommands),

    /// Fetch a secret and print the rendered selector to stdout
    #[command(subcommand)]
    Secret(SecretCommands),

    /// Render all template placeholders in a file with their secret values
    Parse(ParseArgs),
}

#[derive(Subcommand, Debug)]
pub enum TokenCommands {
    /// Create a new token from an AppRole pair, printed to stdout
    Create(TokenCreateArgs),

    /// Renew an existing token; non-zero exit if it cannot be renewed
    Renew(TokenRenewArgs),

    /// Revoke an existing token; non-zero exit if it cannot be revoked
    Revoke(TokenRevokeArgs),
}

#[derive(Args, Debug)]
pub struct TokenCreateArgs {
    /// The Vault AppRole role id
    #[arg(long, env = "VAULT_ROLE_ID")]
    pub role_id: Option<String>,

    /// The Vault AppRole secret id
    #[arg(long, env = "VAULT_SECRET_ID")]
    pub secret_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct TokenRenewArgs {
    /// The token to be renewed
    #[arg(long, env = "VAULT_TOKEN")]
    pub token: Option<String>,
}

#[derive(Args, Debug)]
pub struct TokenRevokeArgs {
    /// The token to be revoked
    #[arg(long, env = "VAULT_TOKEN")]
    pub token: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum SecretCommands {
    /// Fetch a secret and render the selector expression against it
    Get(SecretGetArgs),
}

#[derive(Args, Debug)]
pub struct SecretGetArgs {
    /// The token used to fetch the secret
    #[arg(long, env = "VAULT_TOKEN")]
    pub token: Option<String>,

    /// The vault path for the secret, like 'secret/jenkins/dev/user/admin'
    #[arg(long)]
    pub path: String,

    /// The template selector, like '((.username))'
    #[arg(long)]
    pub selector: String,

    /// Left placeholder delimiter
    #[arg(long, default_value = "((")]
    pub left_delim: String,

    /// Right placeholder delimiter
    #[arg(long, default_value = "))")]
    pub right_delim: String,
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// The Vault AppRole role id
    #[arg(long, env = "VAULT_ROLE_ID")]
    pub role_id: Option<String>,

    /// The Vault AppRole secret id
    #[arg(long, env = "VAULT_SECRET_ID")]
    pub secret_id: Option<String>,

    /// The vault path for the secret, like 'secret/jenkins/dev/user/admin'
    #[arg(long)]
    pub path: String,

    /// The file to render in place
    #[arg(long)]
    pub file: PathBuf,

    /// Left placeholder delimiter
    #[arg(long, default_value = "((")]
    pub left_delim: String,

    /// Right placeholder delimiter
    #[arg(long, default_value = "))")]
    pub right_delim: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_create() {
        let cli = Cli::try_parse_from([
            "vault-helper",
            "--addr",
            "https://vault.example.com:8200",
            "token",
            "create",
            "--role-id",
            "dead-beef",
            "--secret-id",
            "ea7-beef",
        ])
        .unwrap();

        assert_eq!(cli.addr.as_deref(), Some("https://vault.example.com:8200"));
        match cli.command {
            Commands::Token(TokenCommands::Create(args)) => {
                assert_eq!(args.role_id.as_deref(), Some("dead-beef"));
                assert_eq!(args.secret_id.as_deref(), Some("ea7-beef"));
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_secret_get_requires_path_and_selector() {
        let result = Cli::try_parse_from(["vault-helper", "secret", "get", "--path", "secret/x"]);
        assert!(result.is_err(), "Expected missing --selector to fail");
    }

    #[test]
    fn test_parse_file_command_with_custom_delims() {
        let cli = Cli::try_parse_from([
            "vault-helper",
            "parse",
            "--path",
            "secret/jenkins/dev/user/admin",
            "--file",
            "init.groovy",
            "--left-delim",
            "[[",
            "--right-delim",
            "]]",
        ])
        .unwrap();

        match cli.command {
            Commands::Parse(args) => {
                assert_eq!(args.left_delim, "[[");
                assert_eq!(args.right_delim, "]]");
                assert_eq!(args.file, PathBuf::from("init.groovy"));
            }
            other => panic!("Unexpected command: {other:?}"),
        }
    }
}
