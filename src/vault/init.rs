//! # One-Shot Initialisation
//!
//! Request and response types for `PUT /v1/sys/init`, matching the Vault
//! system API schema, plus the initialise operation itself.
//!
//! A non-200 response is fatal and never retried: the initialisation may have
//! been partially applied on the Vault side, and re-submitting against a
//! quorum-based secret-splitting service risks inconsistent state.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants;
use crate::error::BootstrapError;
use crate::vault::VaultClient;

/// Request body for `PUT /v1/sys/init`.
///
/// Fixed share/threshold policy; these values are not user-supplied at
/// runtime. Assumes auto-unseal is configured, so a single recovery share is
/// sufficient.
#[derive(Debug, Clone, Serialize)]
pub struct InitRequest {
    /// Number of shares the recovery key is split into
    pub recovery_shares: u32,
    /// Shares required to reconstruct the recovery key
    pub recovery_threshold: u32,
    /// Number of shares the master key is split into
    pub secret_shares: u32,
    /// Shares required to reconstruct the master key
    pub secret_threshold: u32,
}

impl Default for InitRequest {
    fn default() -> Self {
        Self {
            recovery_shares: 1,
            recovery_threshold: 1,
            secret_shares: 5,
            secret_threshold: 3,
        }
    }
}

impl InitRequest {
    /// Check that each threshold can actually be met by its share count.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InitPolicy`] when a threshold exceeds its
    /// share count.
    pub fn validate(&self) -> Result<(), BootstrapError> {
        if self.recovery_threshold > self.recovery_shares {
            return Err(BootstrapError::InitPolicy(format!(
                "recovery threshold {} exceeds recovery shares {}",
                self.recovery_threshold, self.recovery_shares
            )));
        }
        if self.secret_threshold > self.secret_shares {
            return Err(BootstrapError::InitPolicy(format!(
                "secret threshold {} exceeds secret shares {}",
                self.secret_threshold, self.secret_shares
            )));
        }

        Ok(())
    }
}

/// Response body of a successful `PUT /v1/sys/init`.
///
/// Wiped from memory on drop; the root token and recovery material must not
/// outlive the handoff.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct InitResponse {
    /// Unseal key shares (hex)
    #[serde(default)]
    pub keys: Vec<String>,
    /// Unseal key shares (base64)
    #[serde(default)]
    pub keys_base64: Vec<String>,
    /// The root token produced by initialisation
    pub root_token: String,
    /// Recovery key shares (hex)
    #[serde(default)]
    pub recovery_keys: Vec<String>,
    /// Recovery key shares (base64)
    #[serde(default)]
    pub recovery_keys_base64: Vec<String>,
}

impl std::fmt::Debug for InitResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitResponse")
            .field("keys", &self.keys.len())
            .field("recovery_keys", &self.recovery_keys.len())
            .field("root_token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl VaultClient {
    /// Perform the one-shot initialisation against Vault.
    ///
    /// # Errors
    ///
    /// All failures here are fatal per the bootstrap error policy:
    /// - [`BootstrapError::InitPolicy`] if the request is inconsistent
    /// - [`BootstrapError::InitTransport`] if the request cannot be sent
    /// - [`BootstrapError::InitFailed`] on a non-200 response
    /// - [`BootstrapError::InitResponse`] if the body cannot be parsed
    /// - [`BootstrapError::EmptyRootToken`] if Vault returned 200 without a token
    pub async fn initialize(&self, request: &InitRequest) -> Result<InitResponse, BootstrapError> {
        request.validate()?;

        let url = format!("{}{}", self.addr, constants::INIT_PATH);
        let response = self.http.put(&url).json(request).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(BootstrapError::InitFailed {
                status: status.as_u16(),
            });
        }

        let parsed: InitResponse = response
            .json()
            .await
            .map_err(BootstrapError::InitResponse)?;

        if parsed.root_token.is_empty() {
            return Err(BootstrapError::EmptyRootToken);
        }

        Ok(parsed)
    }
}
