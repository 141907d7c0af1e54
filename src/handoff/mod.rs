//! # Credential Handoff
//!
//! Drives the root token through encryption and durable storage: KMS encrypt
//! under the fully-qualified key ARN, stage the ciphertext in a local file
//! named after the host, upload it to S3, report the object location.
//!
//! Any failure at any step is fatal. The credential is never reported as
//! handled unless both the encryption and the upload succeeded; losing a run
//! is preferred over silently leaving an unencrypted root token in an
//! inconsistent place.

mod kms;
mod s3;

use std::path::PathBuf;

use aws_config::{BehaviorVersion, Region};
use tracing::info;

use crate::config::BootstrapConfig;
use crate::constants;
use crate::error::BootstrapError;

/// Encrypt-and-store pipeline for the root token
pub struct CredentialHandoff {
    kms: aws_sdk_kms::Client,
    s3: aws_sdk_s3::Client,
    key_arn: String,
    bucket: String,
    staging_dir: PathBuf,
}

impl std::fmt::Debug for CredentialHandoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialHandoff")
            .field("key_arn", &self.key_arn)
            .field("bucket", &self.bucket)
            .field("staging_dir", &self.staging_dir)
            .finish_non_exhaustive()
    }
}

impl CredentialHandoff {
    /// Create the handoff pipeline using the default AWS credential chain
    pub async fn new(config: &BootstrapConfig) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;

        Self::from_parts(
            aws_sdk_kms::Client::new(&sdk_config),
            aws_sdk_s3::Client::new(&sdk_config),
            config,
        )
    }

    /// Create the handoff pipeline from pre-built AWS clients.
    ///
    /// Lets tests point the pipeline at mock KMS/S3 endpoints without touching
    /// process-wide environment state.
    #[must_use]
    pub fn from_parts(
        kms: aws_sdk_kms::Client,
        s3: aws_sdk_s3::Client,
        config: &BootstrapConfig,
    ) -> Self {
        Self {
            kms,
            s3,
            key_arn: kms::full_key_id(
                &config.aws_region,
                &config.aws_account_id,
                &config.kms_key_id,
            ),
            bucket: config.token_bucket.clone(),
            staging_dir: std::env::temp_dir(),
        }
    }

    /// Replace the directory used for the local ciphertext file
    #[must_use]
    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    /// Encrypt the root token and upload the ciphertext.
    ///
    /// Returns the location of the uploaded object on success.
    ///
    /// # Errors
    ///
    /// Fatal on KMS failure, local file I/O failure, or S3 failure. The S3
    /// upload is never attempted when encryption failed.
    pub async fn handoff(&self, root_token: &str) -> Result<String, BootstrapError> {
        info!("Encrypting root token under {}...", self.key_arn);
        let ciphertext = kms::encrypt(&self.kms, &self.key_arn, root_token.as_bytes()).await?;
        info!("Encryption complete.");

        // Object name derives from the host identity so multiple hosts
        // bootstrapping separate Vaults cannot collide in the bucket
        let object_name = token_object_name()?;
        let staging_path = self.staging_dir.join(&object_name);
        tokio::fs::write(&staging_path, &ciphertext).await?;

        info!("Uploading encrypted token to S3...");
        let staged = tokio::fs::read(&staging_path).await?;
        let location = s3::upload(&self.s3, &self.bucket, &object_name, staged).await?;
        info!("Encrypted token successfully uploaded to {}", location);

        Ok(location)
    }
}

/// Name of the token object: `<hostname>_token`
fn token_object_name() -> Result<String, BootstrapError> {
    let host = hostname::get().map_err(BootstrapError::Hostname)?;

    Ok(format!(
        "{}{}",
        host.to_string_lossy(),
        constants::TOKEN_FILE_SUFFIX
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_object_name_has_host_prefix_and_suffix() {
        let name = token_object_name().unwrap();
        assert!(name.ends_with("_token"));
        assert!(name.len() > "_token".len(), "hostname part must be present");
    }
}
