//! HTTP client for the Vault API
//!
//! This module owns the transport: timeout and TLS policy, the `/v1` base
//! address, the serial status-code-triggered retry loop, and the response
//! validator every other operation routes through.

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::health::HealthStatus;
use crate::retry::RetryPolicy;

/// Header carrying the session token on authenticated requests
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Health probe location
const SYS_HEALTH_PATH: &str = "sys/health";

/// Statuses the health endpoint uses to report state: 200 active, 429
/// standby, 472/473 replication modes, 501 not initialized, 503 sealed.
/// The body is authoritative; the status only has to be one of these.
const HEALTH_STATUSES: &[u16] = &[200, 429, 472, 473, 501, 503];

/// Structured error strings returned by the service on failures
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ApiErrors {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Client for the Vault HTTP API.
///
/// Holds the built transport, the versioned base address, and this client's
/// retry policy. Construction does not touch the network; call
/// [`ensure_ready`](Self::ensure_ready) before issuing any other operation.
#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
    base: Url,
    retry: RetryPolicy,
}

impl VaultClient {
    /// Build the transport from a validated configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.timeouts.tls_handshake)
            .read_timeout(config.timeouts.response_header)
            .tcp_keepalive(config.timeouts.keep_alive);

        if config.insecure {
            warn!("TLS certificate verification disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build()?;

        // Bind the API version prefix once; endpoint paths join onto it.
        let mut base = config.address.clone();
        {
            let mut segments = base
                .path_segments_mut()
                .map_err(|_| Error::invalid_address(config.address.as_str(), "cannot-be-a-base"))?;
            segments.pop_if_empty().push("v1").push("");
        }

        Ok(Self {
            http,
            base,
            retry: config.retry,
        })
    }

    /// Access the underlying HTTP client for request building
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve an endpoint path against the `/v1` base.
    ///
    /// The result must stay under the base: a path that is itself an
    /// absolute URL, or that climbs out via `..` segments, would redirect a
    /// request bearing the session token to another address.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        let url = self
            .base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::config(format!("invalid endpoint path '{path}': {e}")))?;

        if !url.as_str().starts_with(self.base.as_str()) {
            return Err(Error::config(format!(
                "endpoint path '{path}' escapes the API base"
            )));
        }

        Ok(url)
    }

    /// Probe `sys/health` and fail unless the service is ready.
    ///
    /// Readiness is initialized AND NOT sealed AND NOT standby; on failure
    /// the error carries the prioritized diagnosis. No other operation may
    /// proceed while the service is unready.
    pub async fn ensure_ready(&self) -> Result<HealthStatus> {
        let url = self.endpoint(SYS_HEALTH_PATH)?;
        let response = self
            .execute(HEALTH_STATUSES, || self.http.get(url.clone()))
            .await?;
        let health: HealthStatus = response.json().await?;

        match health.diagnose() {
            None => Ok(health),
            Some(reason) => {
                warn!("health probe failed: {reason}");
                Err(Error::NotReady(reason))
            }
        }
    }

    /// Issue a request, retrying on retryable statuses, and validate the
    /// final response against `expected` statuses.
    ///
    /// The retry loop is serial wait-then-reissue, bounded by the policy's
    /// attempt count with exponential backoff. A transport-level error (no
    /// HTTP response at all) is fatal on the first occurrence.
    pub(crate) async fn execute<F>(&self, expected: &[u16], build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 1u32;

        loop {
            let response = build().send().await?;
            let status = response.status().as_u16();

            // An expected status is never retried, even if it is in the
            // retryable set: the health endpoint reports sealed as 503.
            if !expected.contains(&status)
                && self.retry.is_retryable_status(status)
                && attempt < self.retry.max_attempts
            {
                let delay = self.retry.delay_for_attempt(attempt);
                warn!(
                    "response {} (attempt {}/{}), retrying in {:?}",
                    status, attempt, self.retry.max_attempts, delay
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return self.check_response(response, expected).await;
        }
    }

    /// Validate a response status against the expected set.
    ///
    /// On mismatch the returned error carries the observed status, the
    /// allowed set, and any structured error strings from the body. This is
    /// the single fail-fast chokepoint for every network call.
    async fn check_response(&self, response: Response, expected: &[u16]) -> Result<Response> {
        let status = response.status();
        debug!("response status: {status}");

        if expected.contains(&status.as_u16()) {
            return Ok(response);
        }

        let errors = read_api_errors(response).await;
        Err(Error::UnexpectedStatus {
            status: status.as_u16(),
            expected: expected.to_vec(),
            errors,
        })
    }

    /// Expected-status helper for endpoints that answer 200
    pub(crate) const OK: &'static [u16] = &[200];

    /// Expected-status helper for endpoints that answer 204 with no body
    pub(crate) const NO_CONTENT: &'static [u16] = &[204];
}

/// Best-effort extraction of the service's `{"errors": [...]}` body
async fn read_api_errors(response: Response) -> Vec<String> {
    match response.json::<ApiErrors>().await {
        Ok(body) => body.errors,
        Err(_) => Vec::new(),
    }
}
