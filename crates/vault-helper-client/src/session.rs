//! Per-invocation workflow driver
//!
//! A [`Session`] is scoped to exactly one workflow run. It owns the client,
//! tracks the credential state machine (Unissued → Active → Revoked), and
//! enforces the ownership rules: a credential the session created itself
//! during a file-render workflow is revoked exactly once at the end of that
//! workflow, while an externally supplied token is never auto-revoked.

use std::path::Path;
use tracing::{info, warn};

use crate::client::VaultClient;
use crate::error::{Error, Result};
use crate::template::{render_file_in_place, Delimiters, Template};

/// Credential state tracked across a session's operations
#[derive(Debug, Clone, PartialEq, Eq)]
enum CredentialState {
    /// No credential has passed through this session yet
    Unissued,
    /// A token is in use; `owned` marks a token this session created itself
    Active { token: String, owned: bool },
    /// The token was revoked; reuse is rejected
    Revoked { token: String },
}

/// One workflow run against a single Vault client.
///
/// Must not be reused across workflows or shared between concurrent
/// invocations.
#[derive(Debug)]
pub struct Session {
    client: VaultClient,
    state: CredentialState,
    delims: Delimiters,
}

impl Session {
    /// Create a session over a client that has already passed its readiness
    /// gate
    pub fn new(client: VaultClient) -> Self {
        Self {
            client,
            state: CredentialState::Unissued,
            delims: Delimiters::default(),
        }
    }

    /// Override the template delimiter pair
    pub fn with_delimiters(mut self, delims: Delimiters) -> Self {
        self.delims = delims;
        self
    }

    /// Reject tokens this session has already revoked
    fn check_not_revoked(&self, token: &str) -> Result<()> {
        match &self.state {
            CredentialState::Revoked { token: revoked } if revoked == token => {
                Err(Error::TokenRevoked)
            }
            _ => Ok(()),
        }
    }

    /// Log in with an AppRole pair and return the new token.
    ///
    /// The token is recorded as session-owned but is not auto-revoked; the
    /// caller must revoke it explicitly when done.
    pub async fn create_token(&mut self, role_id: &str, secret_id: &str) -> Result<String> {
        let credential = self.client.login(role_id, secret_id).await?;
        self.state = CredentialState::Active {
            token: credential.client_token.clone(),
            owned: true,
        };
        Ok(credential.client_token)
    }

    /// Renew an externally supplied token and return the refreshed one.
    ///
    /// Renewal does not transfer ownership: the refreshed token is still the
    /// caller's to revoke.
    pub async fn renew_token(&mut self, token: &str) -> Result<String> {
        self.check_not_revoked(token)?;
        let credential = self.client.renew_self(token).await?;
        self.state = CredentialState::Active {
            token: credential.client_token.clone(),
            owned: false,
        };
        Ok(credential.client_token)
    }

    /// Revoke a token. Revocation is terminal: any later operation on this
    /// session using the same token is rejected.
    pub async fn revoke_token(&mut self, token: &str) -> Result<()> {
        self.check_not_revoked(token)?;
        self.client.revoke_self(token).await?;
        self.state = CredentialState::Revoked {
            token: token.to_string(),
        };
        Ok(())
    }

    /// Fetch a secret and render the selector expression against it.
    ///
    /// Read-only: the rendered string is the workflow's only output. The
    /// selector is compiled before any network call so malformed syntax fails
    /// pre-flight.
    pub async fn fetch_secret(&mut self, token: &str, path: &str, selector: &str) -> Result<String> {
        if selector.is_empty() {
            return Err(Error::config("Selector cannot be empty"));
        }
        self.check_not_revoked(token)?;

        let template = Template::compile(selector, &self.delims)?;
        let payload = self.client.read_secret(token, path).await?;
        template.render(&payload.data)
    }

    /// Render a template file in place using a self-created credential.
    ///
    /// Logs in with the AppRole pair, fetches the secret at `path`, rewrites
    /// `file` with every placeholder resolved, and revokes the token it
    /// created exactly once at workflow end, on success and failure alike.
    pub async fn render_file(
        &mut self,
        role_id: &str,
        secret_id: &str,
        path: &str,
        file: &Path,
    ) -> Result<()> {
        if role_id.is_empty() {
            return Err(Error::config("Role ID cannot be empty"));
        }
        if secret_id.is_empty() {
            return Err(Error::config("Secret ID cannot be empty"));
        }
        if path.is_empty() {
            return Err(Error::config("Path cannot be empty"));
        }
        if !file.exists() {
            return Err(Error::config(format!(
                "The file to parse '{}' does not exist or cannot be accessed",
                file.display()
            )));
        }

        let token = self.create_token(role_id, secret_id).await?;

        let outcome = self.render_file_with_token(&token, path, file).await;

        // The self-created token is revoked exactly once regardless of how
        // the render went. A revoke failure on the error path must not mask
        // the primary error.
        match self.revoke_token(&token).await {
            Ok(()) => {}
            Err(revoke_err) if outcome.is_ok() => return Err(revoke_err),
            Err(revoke_err) => warn!("failed to revoke workflow token: {revoke_err}"),
        }

        outcome?;
        info!(
            "Successfully parsed secrets from '{}' into '{}' and auto-revoked token",
            path,
            file.display()
        );
        Ok(())
    }

    async fn render_file_with_token(&self, token: &str, path: &str, file: &Path) -> Result<()> {
        let payload = self.client.read_secret(token, path).await?;
        render_file_in_place(file, &payload.data, &self.delims)
    }
}
