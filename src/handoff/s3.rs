//! # S3 Upload
//!
//! Uploads the encrypted root token to the configured bucket.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::error::BootstrapError;

/// Upload `body` as `key` in `bucket`, returning the object location
pub(crate) async fn upload(
    client: &Client,
    bucket: &str,
    key: &str,
    body: Vec<u8>,
) -> Result<String, BootstrapError> {
    client
        .put_object()
        .bucket(bucket)
        .key(key)
        .body(ByteStream::from(body))
        .send()
        .await
        .map_err(|e| BootstrapError::S3(e.into()))?;

    Ok(format!("s3://{bucket}/{key}"))
}
