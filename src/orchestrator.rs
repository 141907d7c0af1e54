//! # Initialisation Orchestrator
//!
//! The core control flow: poll Vault's health endpoint until it reports a
//! lifecycle state or shutdown is requested, map the state to an action, and
//! perform the one-shot initialisation followed by the credential handoff
//! when Vault has never been initialised.
//!
//! The poll loop is unbounded by design. Vault is expected to eventually
//! become reachable; only a resolved state or a shutdown request ends the
//! loop. Cancellation is cooperative: the loop returns a distinct outcome and
//! the caller decides on exit code and cleanup.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::BootstrapConfig;
use crate::error::BootstrapError;
use crate::handoff::CredentialHandoff;
use crate::vault::{InitRequest, LifecycleState, VaultClient};

/// Outcome of the health poll loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Vault answered the health probe with a classifiable status
    Resolved(LifecycleState),
    /// A shutdown request arrived before the state resolved
    Cancelled,
}

/// Action derived from a resolved lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Vault needs no bootstrap work; log the reason and go dormant
    DoNothing,
    /// Vault has never been initialised; perform the one-shot init
    Initialize,
}

/// Outcome of a full orchestration run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Shutdown was requested before the lifecycle state resolved
    Cancelled,
    /// Vault required no action; the process goes dormant
    Dormant(LifecycleState),
    /// Vault was initialised and the encrypted root token stored
    Initialized {
        /// Location of the uploaded ciphertext object
        location: String,
    },
}

/// Map a lifecycle state to the bootstrap action.
///
/// Only `Uninitialized` triggers initialisation; every other state, including
/// `Unknown`, is left alone.
#[must_use]
pub fn decide(state: LifecycleState) -> Action {
    match state {
        LifecycleState::Uninitialized => Action::Initialize,
        LifecycleState::Ready
        | LifecycleState::Standby
        | LifecycleState::Sealed
        | LifecycleState::Unknown(_) => Action::DoNothing,
    }
}

/// Poll the health endpoint until Vault reports a state or shutdown arrives.
///
/// A probe transport failure never terminates the loop; it is logged and the
/// loop sleeps for `interval` before retrying. The shutdown token is checked
/// at the top of every iteration and observed during the retry sleep, so
/// shutdown latency is at most one interval.
pub async fn poll_until_resolved(
    vault: &VaultClient,
    interval: Duration,
    shutdown: &CancellationToken,
) -> PollOutcome {
    loop {
        if shutdown.is_cancelled() {
            info!("Shutdown requested, stopping health polling");
            return PollOutcome::Cancelled;
        }

        match vault.probe().await {
            Ok(state) => return PollOutcome::Resolved(state),
            Err(e) => {
                warn!("{}", e);
                info!("Retrying health check in {:?}", interval);
                tokio::select! {
                    () = shutdown.cancelled() => {
                        info!("Shutdown requested, stopping health polling");
                        return PollOutcome::Cancelled;
                    }
                    () = tokio::time::sleep(interval) => {}
                }
            }
        }
    }
}

/// Run the bootstrap orchestration end to end.
///
/// Polls for the lifecycle state, then either goes dormant or performs the
/// one-shot initialisation and hands the root token to the encrypt-and-store
/// pipeline. Initialisation happens at most once per run, regardless of how
/// many poll iterations preceded it.
///
/// # Errors
///
/// Propagates fatal [`BootstrapError`]s from the init call or the handoff.
/// Probe failures are handled inside the poll loop and never surface here.
pub async fn run(
    vault: &VaultClient,
    handoff: &CredentialHandoff,
    config: &BootstrapConfig,
    shutdown: &CancellationToken,
) -> Result<RunOutcome, BootstrapError> {
    info!("Probing Vault at {}...", vault.addr());

    let state = match poll_until_resolved(vault, config.check_interval, shutdown).await {
        PollOutcome::Cancelled => return Ok(RunOutcome::Cancelled),
        PollOutcome::Resolved(state) => state,
    };

    match decide(state) {
        Action::DoNothing => {
            info!("{}", state.dormant_message());
            Ok(RunOutcome::Dormant(state))
        }
        Action::Initialize => {
            info!("Vault is not initialised. Initialising...");
            let mut response = vault.initialize(&InitRequest::default()).await?;
            info!("Initialisation complete");

            // Take the token out of the response so the remaining recovery
            // material can be wiped independently of the handoff lifetime
            let root_token = zeroize::Zeroizing::new(std::mem::take(&mut response.root_token));
            drop(response);

            let location = handoff.handoff(&root_token).await?;

            Ok(RunOutcome::Initialized { location })
        }
    }
}
