//! # Bootstrap Configuration
//!
//! Configuration loaded once at startup from environment variables.
//!
//! The Vault address, poll interval, and token bucket have sensible defaults.
//! The AWS parameters are required: the process refuses to start without them
//! rather than discovering the gap after Vault has already been initialised.

use std::time::Duration;

use crate::constants;
use crate::error::BootstrapError;

/// Startup configuration for the bootstrap run
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Address of the Vault instance to bootstrap (`VAULT_ADDR`)
    pub vault_addr: String,
    /// Interval between health-check retries while Vault is unreachable (`CHECK_INTERVAL`, whole seconds)
    pub check_interval: Duration,
    /// AWS region for KMS and S3 (`AWS_REGION`)
    pub aws_region: String,
    /// AWS account number, used in the fully-qualified KMS key ARN (`AWS_ACCOUNT_NUMBER`)
    pub aws_account_id: String,
    /// KMS key ID used to encrypt the root token (`AWS_KMS_KEY_ID`)
    pub kms_key_id: String,
    /// S3 bucket that receives the encrypted token (`TOKEN_BUCKET`)
    pub token_bucket: String,
}

/// CLI overrides applied on top of the environment configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces `VAULT_ADDR` when set
    pub vault_addr: Option<String>,
    /// Replaces `CHECK_INTERVAL` when set
    pub check_interval_secs: Option<u64>,
}

impl BootstrapConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Config`] when a required variable is missing
    /// or a present value cannot be parsed. A present-but-malformed value is
    /// never silently replaced by a default.
    pub fn from_env() -> Result<Self, BootstrapError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Apply CLI overrides on top of the loaded configuration
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(addr) = &overrides.vault_addr {
            self.vault_addr = addr.trim_end_matches('/').to_string();
        }
        if let Some(secs) = overrides.check_interval_secs {
            self.check_interval = Duration::from_secs(secs);
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BootstrapError> {
        let vault_addr = lookup("VAULT_ADDR")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| constants::DEFAULT_VAULT_ADDR.to_string());
        // Ensure the address doesn't have a trailing slash; endpoint paths
        // are joined with a leading slash
        let vault_addr = vault_addr.trim_end_matches('/').to_string();

        let check_interval_secs = match lookup("CHECK_INTERVAL") {
            None => constants::DEFAULT_CHECK_INTERVAL_SECS,
            Some(raw) => raw.parse::<u64>().map_err(|e| {
                BootstrapError::Config(format!("CHECK_INTERVAL is not a whole number of seconds: {e}"))
            })?,
        };

        let aws_region = required(&lookup, "AWS_REGION")?;
        let aws_account_id = required(&lookup, "AWS_ACCOUNT_NUMBER")?;
        let kms_key_id = required(&lookup, "AWS_KMS_KEY_ID")?;

        let token_bucket = lookup("TOKEN_BUCKET")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| constants::DEFAULT_TOKEN_BUCKET.to_string());

        Ok(Self {
            vault_addr,
            check_interval: Duration::from_secs(check_interval_secs),
            aws_region,
            aws_account_id,
            kms_key_id,
            token_bucket,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<String, BootstrapError> {
    lookup(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| BootstrapError::Config(format!("{key} must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| (*v).to_string())
    }

    fn aws_env() -> Vec<(&'static str, &'static str)> {
        vec![
            ("AWS_REGION", "eu-west-1"),
            ("AWS_ACCOUNT_NUMBER", "123456789012"),
            ("AWS_KMS_KEY_ID", "my-key"),
        ]
    }

    #[test]
    fn test_defaults_applied() {
        let config = BootstrapConfig::from_lookup(env(&aws_env())).unwrap();
        assert_eq!(config.vault_addr, "http://127.0.0.1:8200");
        assert_eq!(config.check_interval, Duration::from_secs(10));
        assert_eq!(config.token_bucket, "encrypted-tokens");
    }

    #[test]
    fn test_vault_addr_trailing_slash_trimmed() {
        let mut pairs = aws_env();
        pairs.push(("VAULT_ADDR", "http://vault.internal:8200/"));
        let config = BootstrapConfig::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.vault_addr, "http://vault.internal:8200");
    }

    #[test]
    fn test_check_interval_parsed() {
        let mut pairs = aws_env();
        pairs.push(("CHECK_INTERVAL", "3"));
        let config = BootstrapConfig::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.check_interval, Duration::from_secs(3));
    }

    #[test]
    fn test_malformed_check_interval_is_fatal() {
        let mut pairs = aws_env();
        pairs.push(("CHECK_INTERVAL", "soon"));
        let result = BootstrapConfig::from_lookup(env(&pairs));
        assert!(matches!(result, Err(BootstrapError::Config(_))));
    }

    #[test]
    fn test_missing_aws_region_is_fatal() {
        let result = BootstrapConfig::from_lookup(env(&[
            ("AWS_ACCOUNT_NUMBER", "123456789012"),
            ("AWS_KMS_KEY_ID", "my-key"),
        ]));
        match result {
            Err(BootstrapError::Config(message)) => {
                assert!(message.contains("AWS_REGION"));
            }
            other => panic!("Expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_required_value_is_fatal() {
        let mut pairs = aws_env();
        pairs.retain(|(key, _)| *key != "AWS_KMS_KEY_ID");
        pairs.push(("AWS_KMS_KEY_ID", ""));
        let result = BootstrapConfig::from_lookup(env(&pairs));
        assert!(matches!(result, Err(BootstrapError::Config(_))));
    }

    #[test]
    fn test_overrides_replace_env_values() {
        let mut config = BootstrapConfig::from_lookup(env(&aws_env())).unwrap();
        config.apply_overrides(&ConfigOverrides {
            vault_addr: Some("http://other:8200/".to_string()),
            check_interval_secs: Some(1),
        });
        assert_eq!(config.vault_addr, "http://other:8200");
        assert_eq!(config.check_interval, Duration::from_secs(1));
    }
}
