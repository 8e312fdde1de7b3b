//! Credential lifecycle: AppRole login, token renew, token revoke

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::{VaultClient, TOKEN_HEADER};
use crate::error::{Error, Result};

const APPROLE_LOGIN_PATH: &str = "auth/approle/login";
const TOKEN_RENEW_SELF_PATH: &str = "auth/token/renew-self";
const TOKEN_REVOKE_SELF_PATH: &str = "auth/token/revoke-self";

/// AppRole login request body
#[derive(Debug, Serialize)]
struct AppRoleLogin<'a> {
    role_id: &'a str,
    secret_id: &'a str,
}

/// Wrapper around the `auth` block login and renew responses share
#[derive(Debug, Deserialize)]
struct AuthResponse {
    auth: Credential,
}

/// A session credential produced by login or renew.
///
/// Valid for `lease_duration` seconds; ownership and revoke-once discipline
/// are tracked by [`Session`](crate::session::Session).
#[derive(Debug, Clone, Deserialize)]
pub struct Credential {
    pub client_token: String,
    #[serde(default)]
    pub accessor: String,
    #[serde(default)]
    pub policies: Vec<String>,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub renewable: bool,
    #[serde(default)]
    pub entity_id: String,
}

impl VaultClient {
    /// Log in with an AppRole pair, producing a new credential.
    ///
    /// Fails pre-flight, without any network call, if either identifier is
    /// empty.
    pub async fn login(&self, role_id: &str, secret_id: &str) -> Result<Credential> {
        if role_id.is_empty() {
            return Err(Error::config("Role ID cannot be empty"));
        }
        if secret_id.is_empty() {
            return Err(Error::config("Secret ID cannot be empty"));
        }

        let url = self.endpoint(APPROLE_LOGIN_PATH)?;
        let body = AppRoleLogin { role_id, secret_id };
        let response = self
            .execute(Self::OK, || self.http().post(url.clone()).json(&body))
            .await?;

        let auth: AuthResponse = response.json().await?;
        debug!("approle login succeeded, accessor {}", auth.auth.accessor);
        Ok(auth.auth)
    }

    /// Renew the given token against itself, producing a refreshed credential
    pub async fn renew_self(&self, token: &str) -> Result<Credential> {
        if token.is_empty() {
            return Err(Error::config("Token cannot be empty"));
        }

        let url = self.endpoint(TOKEN_RENEW_SELF_PATH)?;
        let response = self
            .execute(Self::OK, || {
                self.http().post(url.clone()).header(TOKEN_HEADER, token)
            })
            .await?;

        let auth: AuthResponse = response.json().await?;
        debug!("token renewed, lease {}s", auth.auth.lease_duration);
        Ok(auth.auth)
    }

    /// Revoke the given token against itself. Expects 204 with no body.
    pub async fn revoke_self(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return Err(Error::config("Token cannot be empty"));
        }

        let url = self.endpoint(TOKEN_REVOKE_SELF_PATH)?;
        self.execute(Self::NO_CONTENT, || {
            self.http().post(url.clone()).header(TOKEN_HEADER, token)
        })
        .await?;

        info!("Token revoked successfully");
        Ok(())
    }
}
