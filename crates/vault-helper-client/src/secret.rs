//! Authenticated secret retrieval

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::client::{VaultClient, TOKEN_HEADER};
use crate::error::{Error, Result};

/// A secret payload read from the service.
///
/// `data` values are arbitrarily nested JSON-shaped values; no schema is
/// assumed beyond valid JSON. Fetched fresh per request, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct SecretPayload {
    #[serde(default)]
    pub data: BTreeMap<String, Value>,
    #[serde(default)]
    pub lease_duration: u64,
    #[serde(default)]
    pub lease_id: String,
    #[serde(default)]
    pub renewable: bool,
}

impl VaultClient {
    /// Fetch the secret payload at `path`, bearing `token`.
    ///
    /// `path` is relative to the API version prefix, like
    /// `secret/jenkins/dev/user/admin`. Fails pre-flight if either argument
    /// is empty.
    pub async fn read_secret(&self, token: &str, path: &str) -> Result<SecretPayload> {
        if token.is_empty() {
            return Err(Error::config("Token cannot be empty"));
        }
        if path.is_empty() {
            return Err(Error::config("Path cannot be empty"));
        }

        let url = self.endpoint(path)?;
        let response = self
            .execute(Self::OK, || {
                self.http().get(url.clone()).header(TOKEN_HEADER, token)
            })
            .await?;

        let payload: SecretPayload = response.json().await?;
        debug!(
            "fetched secret at '{}' with {} keys",
            path,
            payload.data.len()
        );
        Ok(payload)
    }
}
