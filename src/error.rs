//! # Error Types
//!
//! Error types for the bootstrap orchestrator, split into two classes:
//!
//! - [`ProbeError`] — the target Vault could not be reached during health
//!   polling. Always recoverable: the poll loop logs it and retries after the
//!   configured interval.
//! - [`BootstrapError`] — everything else. Always fatal: retrying a one-shot
//!   initialisation against a quorum secret-splitting service risks
//!   inconsistent state, so the process aborts and the operator re-invokes it.

use thiserror::Error;

/// Recoverable failure to reach the Vault health endpoint.
///
/// Covers connection refused, timeouts, and DNS failures during startup races
/// where Vault is not yet listening. Never escalated to a process exit.
#[derive(Debug, Error)]
#[error("Vault health endpoint unreachable: {source}")]
pub struct ProbeError {
    #[from]
    source: reqwest::Error,
}

/// Fatal bootstrap failure. Any of these aborts the run with a non-zero exit.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Missing or malformed environment configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The init request itself could not be sent or the response body read
    #[error("Vault init request failed: {0}")]
    InitTransport(#[from] reqwest::Error),

    /// Vault answered the init request with a non-200 status.
    ///
    /// Deliberately not retried: the initialisation may have been partially
    /// applied on the Vault side.
    #[error("Vault init returned non-200 status code: {status}")]
    InitFailed {
        /// HTTP status code returned by the init endpoint
        status: u16,
    },

    /// The init response body was not valid JSON for the expected schema
    #[error("Vault init response could not be parsed: {0}")]
    InitResponse(#[source] reqwest::Error),

    /// Vault returned 200 but the root token field was empty
    #[error("Vault init response contained an empty root token")]
    EmptyRootToken,

    /// The fixed share/threshold policy is internally inconsistent
    #[error("invalid init policy: {0}")]
    InitPolicy(String),

    /// The HTTP client could not be constructed
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// KMS encryption of the root token failed
    #[error("KMS encryption failed: {0}")]
    Kms(#[source] aws_sdk_kms::Error),

    /// KMS answered the encrypt call without a ciphertext blob
    #[error("KMS returned no ciphertext blob")]
    MissingCiphertext,

    /// Uploading the encrypted token to S3 failed
    #[error("S3 upload failed: {0}")]
    S3(#[source] aws_sdk_s3::Error),

    /// The host's identity could not be resolved for the token object name
    #[error("failed to resolve hostname: {0}")]
    Hostname(#[source] std::io::Error),

    /// Local staging file I/O failed
    #[error("token file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
