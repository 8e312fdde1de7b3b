//! Error types for vault-helper-client

use thiserror::Error;

use crate::health::UnreadyReason;

/// Result type alias using vault-helper-client's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Vault client
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or missing configuration detected before any network call
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Address is not an absolute URI with scheme and host
    #[error("Invalid Vault address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// Vault is reachable but not ready to serve requests
    #[error("Vault is not ready: {0}")]
    NotReady(UnreadyReason),

    /// Transport-level HTTP failure (DNS, refused connection, TLS handshake).
    /// These are fatal immediately; only status-code failures are retried.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status outside the expected set
    #[error("Response {status} was not one of {expected:?}: {}", .errors.join(", "))]
    UnexpectedStatus {
        status: u16,
        expected: Vec<u16>,
        errors: Vec<String>,
    },

    /// Malformed placeholder syntax in a selector or template file
    #[error("Template error: {message}")]
    Template { message: String },

    /// A placeholder's field path did not resolve against the secret payload
    #[error("Unresolved field path '{path}' in template")]
    UnresolvedField { path: String },

    /// Attempted to use a token this session has already revoked
    #[error("Token was already revoked in this session")]
    TokenRevoked,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid address error
    pub fn invalid_address(address: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            message: message.into(),
        }
    }

    /// Create a template error
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an unresolved field error from path segments
    pub fn unresolved_field(segments: &[String]) -> Self {
        Self::UnresolvedField {
            path: format!(".{}", segments.join(".")),
        }
    }
}
