//! Client configuration and address validation

use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

/// Transport timeouts applied when building the HTTP client.
///
/// `tls_handshake` maps to the connect timeout (connection + TLS handshake),
/// `response_header` to the read timeout, and `keep_alive` to TCP keepalive.
/// The legacy expect-continue timeout has no separate knob in the transport
/// and is covered by the read timeout.
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub tls_handshake: Duration,
    pub response_header: Duration,
    pub keep_alive: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            tls_handshake: Duration::from_secs(10),
            response_header: Duration::from_secs(20),
            keep_alive: Duration::from_secs(3),
        }
    }
}

/// Validated configuration for a [`VaultClient`]
///
/// [`VaultClient`]: crate::client::VaultClient
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Vault base address, like `https://vault.example.com:8200`
    pub address: Url,

    /// Skip TLS certificate verification
    pub insecure: bool,

    /// Transport timeouts
    pub timeouts: Timeouts,

    /// Per-client retry policy
    pub retry: RetryPolicy,
}

impl ClientConfig {
    /// Validate `address` and build a config with default timeouts and retry
    /// policy.
    ///
    /// The address must be an absolute URI with an http or https scheme and a
    /// host; anything else is a configuration error detected before any
    /// network call.
    pub fn new(address: &str, insecure: bool) -> Result<Self> {
        let url = Url::parse(address)
            .map_err(|e| Error::invalid_address(address, e.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(Error::invalid_address(
                    address,
                    format!("unsupported scheme '{other}'"),
                ));
            }
        }

        if url.host_str().is_none() {
            return Err(Error::invalid_address(address, "missing host"));
        }

        Ok(Self {
            address: url,
            insecure,
            timeouts: Timeouts::default(),
            retry: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Replace the transport timeouts
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}
