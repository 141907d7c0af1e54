//! # KMS Encryption
//!
//! Encrypts the root token under the configured AWS KMS key.

use aws_sdk_kms::primitives::Blob;
use aws_sdk_kms::Client;

use crate::error::BootstrapError;

/// Assemble the fully-qualified KMS key ARN from its parts
pub(crate) fn full_key_id(region: &str, account_id: &str, key_id: &str) -> String {
    format!("arn:aws:kms:{region}:{account_id}:key/{key_id}")
}

/// Encrypt `plaintext` under `key_id`, returning the ciphertext blob
pub(crate) async fn encrypt(
    client: &Client,
    key_id: &str,
    plaintext: &[u8],
) -> Result<Vec<u8>, BootstrapError> {
    let response = client
        .encrypt()
        .key_id(key_id)
        .plaintext(Blob::new(plaintext))
        .send()
        .await
        .map_err(|e| BootstrapError::Kms(e.into()))?;

    let blob = response
        .ciphertext_blob
        .ok_or(BootstrapError::MissingCiphertext)?;

    Ok(blob.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_key_id_format() {
        let arn = full_key_id("eu-west-1", "123456789012", "alias-key");
        assert_eq!(arn, "arn:aws:kms:eu-west-1:123456789012:key/alias-key");
    }
}
