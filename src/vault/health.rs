//! # Health Probe
//!
//! Classifies the Vault health endpoint's status code into a lifecycle state.
//!
//! Vault encodes its lifecycle in the HTTP status of `/v1/sys/health`:
//! 200 initialised and unsealed, 429 unsealed standby, 501 not initialised,
//! 503 sealed. Transport failures are reported as a recoverable
//! [`ProbeError`] so the poll loop can retry; Vault may simply not be
//! listening yet during startup races.

use crate::constants;
use crate::error::ProbeError;
use crate::vault::VaultClient;

/// Lifecycle state of the target Vault instance, recomputed on every poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// Initialised and unsealed (health status 200)
    Ready,
    /// Unsealed and in standby mode (health status 429)
    Standby,
    /// Never initialised (health status 501) — triggers the one-shot init
    Uninitialized,
    /// Initialised but sealed (health status 503) — needs an external unseal
    Sealed,
    /// Any other health status code, carried for the operator log
    Unknown(u16),
}

impl LifecycleState {
    /// Map a health endpoint status code to a lifecycle state
    #[must_use]
    pub fn from_status(code: u16) -> Self {
        match code {
            200 => Self::Ready,
            429 => Self::Standby,
            501 => Self::Uninitialized,
            503 => Self::Sealed,
            other => Self::Unknown(other),
        }
    }

    /// Operator-facing message for the states that require no action
    #[must_use]
    pub fn dormant_message(&self) -> String {
        match self {
            Self::Ready => "Vault is initialised and unsealed. Going dormant...".to_string(),
            Self::Standby => "Vault is unsealed and in standby mode. Going dormant...".to_string(),
            Self::Sealed => {
                "Vault is initialised, but still sealed. Use the tokens received after last \
                 initialisation to unseal. Going dormant..."
                    .to_string()
            }
            Self::Unknown(code) => format!(
                "Vault is in an unknown state. Health status code: {code}. Going dormant..."
            ),
            Self::Uninitialized => "Vault is not initialised.".to_string(),
        }
    }
}

impl VaultClient {
    /// Probe the Vault health endpoint and classify the response.
    ///
    /// Sends a bodyless `HEAD` request; only the status code matters.
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`ProbeError`] when Vault cannot be reached
    /// (connection refused, timeout, DNS failure). Never fatal.
    pub async fn probe(&self) -> Result<LifecycleState, ProbeError> {
        let url = format!("{}{}", self.addr, constants::HEALTH_PATH);
        let response = self.http.head(&url).send().await?;

        Ok(LifecycleState::from_status(response.status().as_u16()))
    }
}
