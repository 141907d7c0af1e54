//! # Constants
//!
//! Default values for configuration and well-known Vault API paths.

/// Default Vault address when `VAULT_ADDR` is not set
pub const DEFAULT_VAULT_ADDR: &str = "http://127.0.0.1:8200";

/// Default health-poll interval in whole seconds when `CHECK_INTERVAL` is not set
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 10;

/// Default S3 bucket for encrypted root tokens when `TOKEN_BUCKET` is not set
pub const DEFAULT_TOKEN_BUCKET: &str = "encrypted-tokens";

/// Vault health endpoint, relative to the Vault address
pub const HEALTH_PATH: &str = "/v1/sys/health";

/// Vault initialisation endpoint, relative to the Vault address
pub const INIT_PATH: &str = "/v1/sys/init";

/// Suffix appended to the hostname to form the token object name
pub const TOKEN_FILE_SUFFIX: &str = "_token";
