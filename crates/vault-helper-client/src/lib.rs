//! Vault client library for vault-helper
//!
//! This crate provides the core of the vault-helper CLI:
//! - **Connection management**: transport build with timeout/TLS policy, a
//!   bounded status-code-triggered retry loop, and a readiness gate against
//!   `sys/health`
//! - **Credential lifecycle**: AppRole login, token renew, token revoke, with
//!   session-level revoke-once ownership tracking
//! - **Secret retrieval**: authenticated reads of JSON-shaped payloads
//! - **Template rendering**: `((.field.path))` placeholder substitution for
//!   inline selectors and in-place file rendering
//!
//! Every operation returns a typed [`Result`]; nothing in this crate
//! terminates the process.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod retry;
pub mod secret;
pub mod session;
pub mod template;

// Re-export commonly used items
pub use auth::Credential;
pub use client::VaultClient;
pub use config::{ClientConfig, Timeouts};
pub use error::{Error, Result};
pub use health::{HealthStatus, UnreadyReason};
pub use retry::RetryPolicy;
pub use secret::SecretPayload;
pub use session::Session;
pub use template::{render_file_in_place, Delimiters, Template};
