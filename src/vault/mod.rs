//! # Vault HTTP API Client
//!
//! Minimal client for the two Vault system endpoints this tool touches:
//! `HEAD /v1/sys/health` for lifecycle-state probing and `PUT /v1/sys/init`
//! for one-shot initialisation.

mod health;
mod init;

pub use health::LifecycleState;
pub use init::{InitRequest, InitResponse};

use crate::error::BootstrapError;
use reqwest::Client;

/// Client for the target Vault instance
#[derive(Debug, Clone)]
pub struct VaultClient {
    pub(crate) http: Client,
    pub(crate) addr: String,
}

impl VaultClient {
    /// Create a client for the Vault instance at `addr`.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::HttpClient`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(addr: &str) -> Result<Self, BootstrapError> {
        let http = Client::builder()
            .build()
            .map_err(BootstrapError::HttpClient)?;

        Ok(Self {
            http,
            addr: addr.trim_end_matches('/').to_string(),
        })
    }

    /// Address of the Vault instance this client talks to
    #[must_use]
    pub fn addr(&self) -> &str {
        &self.addr
    }
}
