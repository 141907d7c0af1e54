//! # Shutdown Coordinator
//!
//! Listens for SIGINT/SIGTERM in a background task and propagates the request
//! cooperatively through a [`CancellationToken`]. The token is write-once and
//! idempotent: repeated signals collapse into the single cancelled state.
//!
//! SIGKILL cannot be intercepted and bypasses the coordinator entirely.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Coordinates cooperative shutdown between the signal listener, the health
/// poll loop, and the final dormant wait point.
#[derive(Debug)]
pub struct ShutdownCoordinator {
    token: CancellationToken,
}

impl ShutdownCoordinator {
    /// Spawn the signal listener and return the coordinator.
    ///
    /// # Panics
    ///
    /// Panics if the OS signal handlers cannot be installed; the process
    /// cannot run safely without them.
    #[must_use]
    pub fn spawn() -> Self {
        let token = CancellationToken::new();
        let signal_token = token.clone();

        tokio::spawn(async move {
            let ctrl_c = async {
                tokio::signal::ctrl_c()
                    .await
                    .expect("Failed to install SIGINT handler");
            };

            #[cfg(unix)]
            let terminate = async {
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("Failed to install SIGTERM handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                () = ctrl_c => {},
                () = terminate => {},
            }

            info!("Termination signal received");
            signal_token.cancel();
        });

        Self { token }
    }

    /// Clone the cancellation token for a consumer (e.g. the poll loop)
    #[must_use]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Block until shutdown is requested. This is the process's dormant wait
    /// point after the bootstrap work is done.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }
}
