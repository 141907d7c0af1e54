//! # vault-bootstrap binary
//!
//! Thin entrypoint: parse CLI overrides, initialise the runtime, run the
//! orchestration, then block until a termination signal arrives. Exits 0 on
//! every clean path (dormant no-op, post-handoff success, cancellation) and
//! non-zero on any fatal error.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use vault_bootstrap::config::ConfigOverrides;
use vault_bootstrap::orchestrator::{self, RunOutcome};
use vault_bootstrap::runtime;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Initialise a Vault instance once and store its encrypted root token on S3",
    long_about = "Polls the Vault health endpoint until the instance reports a lifecycle state, \
                  initialises it if it has never been initialised, encrypts the resulting root \
                  token with AWS KMS, and uploads the ciphertext to S3. Assumes auto-unseal is \
                  configured on the Vault side."
)]
struct Args {
    /// Vault address to bootstrap (overrides VAULT_ADDR)
    #[arg(long)]
    vault_addr: Option<String>,

    /// Seconds between health checks while Vault is unreachable (overrides CHECK_INTERVAL)
    #[arg(long)]
    check_interval: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let init = runtime::initialize(&ConfigOverrides {
        vault_addr: args.vault_addr,
        check_interval_secs: args.check_interval,
    })
    .await?;

    let shutdown_token = init.shutdown.token();
    let outcome =
        orchestrator::run(&init.vault, &init.handoff, &init.config, &shutdown_token).await?;

    if outcome == RunOutcome::Cancelled {
        info!("Shutting down...");
        return Ok(());
    }

    // Bootstrap work is done; stay resident until a termination signal so a
    // supervisor does not restart-loop the process
    init.shutdown.wait().await;
    info!("Shutting down...");

    Ok(())
}
