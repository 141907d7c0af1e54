//! # Runtime Initialisation
//!
//! Startup wiring: rustls setup, tracing subscriber, configuration load, and
//! construction of the Vault client, handoff pipeline, and shutdown
//! coordinator. All components are built here once and passed to the
//! orchestrator; nothing hangs off process-wide mutable state.

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{BootstrapConfig, ConfigOverrides};
use crate::handoff::CredentialHandoff;
use crate::shutdown::ShutdownCoordinator;
use crate::vault::VaultClient;

/// Initialisation result containing all components for the bootstrap run
#[derive(Debug)]
pub struct InitializationResult {
    /// Resolved startup configuration
    pub config: BootstrapConfig,
    /// Client for the target Vault instance
    pub vault: VaultClient,
    /// Encrypt-and-store pipeline for the root token
    pub handoff: CredentialHandoff,
    /// Signal listener and dormant wait point
    pub shutdown: ShutdownCoordinator,
}

/// Initialise the bootstrap runtime.
///
/// This function handles:
/// - rustls crypto provider setup
/// - Tracing subscriber setup
/// - Configuration load from environment plus CLI overrides
/// - Vault client, credential handoff, and shutdown coordinator construction
///
/// # Errors
///
/// Fails on missing or malformed configuration, or if the HTTP client cannot
/// be built. Both abort the process before any Vault interaction.
pub async fn initialize(overrides: &ConfigOverrides) -> Result<InitializationResult> {
    // Configure rustls crypto provider FIRST, before any other operations
    // Required for rustls 0.23+ when no default provider is set via features
    // We use ring as the crypto provider
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_bootstrap=info".into()),
        )
        .init();

    info!("Starting Vault Bootstrap");

    let mut config = BootstrapConfig::from_env().context("Failed to load configuration")?;
    config.apply_overrides(overrides);

    let vault = VaultClient::new(&config.vault_addr).context("Failed to create Vault client")?;
    let handoff = CredentialHandoff::new(&config).await;

    // Spawned before any polling so a termination request can interrupt the
    // very first health check
    let shutdown = ShutdownCoordinator::spawn();

    Ok(InitializationResult {
        config,
        vault,
        handoff,
        shutdown,
    })
}
