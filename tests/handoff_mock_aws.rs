//! # Credential Handoff Integration Tests
//!
//! Exercises the encrypt-and-store pipeline against mock KMS and S3
//! endpoints. The pipeline may only report success when both the encryption
//! call and the upload succeed; any single failure must be fatal and must
//! prevent the later steps.

use std::time::Duration;

use wiremock::matchers::{header, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vault_bootstrap::config::BootstrapConfig;
use vault_bootstrap::error::BootstrapError;
use vault_bootstrap::handoff::CredentialHandoff;

/// Base64 of the ciphertext bytes served by the mock KMS
const MOCK_CIPHERTEXT_B64: &str = "Y2lwaGVydGV4dC1ieXRlcw==";

fn test_config() -> BootstrapConfig {
    BootstrapConfig {
        vault_addr: "http://127.0.0.1:8200".to_string(),
        check_interval: Duration::from_secs(10),
        aws_region: "eu-west-1".to_string(),
        aws_account_id: "123456789012".to_string(),
        kms_key_id: "test-key".to_string(),
        token_bucket: "encrypted-tokens".to_string(),
    }
}

fn kms_client(endpoint: &str) -> aws_sdk_kms::Client {
    let config = aws_sdk_kms::config::Builder::new()
        .behavior_version(aws_sdk_kms::config::BehaviorVersion::latest())
        .region(aws_sdk_kms::config::Region::new("eu-west-1"))
        .credentials_provider(aws_sdk_kms::config::Credentials::new(
            "test", "test", None, None, "test",
        ))
        .retry_config(aws_sdk_kms::config::retry::RetryConfig::disabled())
        .endpoint_url(endpoint)
        .build();
    aws_sdk_kms::Client::from_conf(config)
}

fn s3_client(endpoint: &str) -> aws_sdk_s3::Client {
    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new("eu-west-1"))
        .credentials_provider(aws_sdk_s3::config::Credentials::new(
            "test", "test", None, None, "test",
        ))
        .retry_config(aws_sdk_s3::config::retry::RetryConfig::disabled())
        .endpoint_url(endpoint)
        .force_path_style(true)
        .build();
    aws_sdk_s3::Client::from_conf(config)
}

fn encrypt_ok() -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/x-amz-json-1.1")
        .set_body_string(format!(
            r#"{{"CiphertextBlob":"{MOCK_CIPHERTEXT_B64}","KeyId":"arn:aws:kms:eu-west-1:123456789012:key/test-key"}}"#
        ))
}

#[tokio::test]
async fn handoff_encrypts_stages_and_uploads() {
    let kms_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("x-amz-target", "TrentService.Encrypt"))
        .respond_with(encrypt_ok())
        .expect(1)
        .mount(&kms_server)
        .await;

    let s3_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/encrypted-tokens/.+_token$"))
        .respond_with(ResponseTemplate::new(200).insert_header("ETag", "\"mock\""))
        .expect(1)
        .mount(&s3_server)
        .await;

    let staging = tempfile::tempdir().unwrap();
    let config = test_config();
    let handoff = CredentialHandoff::from_parts(
        kms_client(&kms_server.uri()),
        s3_client(&s3_server.uri()),
        &config,
    )
    .with_staging_dir(staging.path());

    let location = handoff.handoff("abc123").await.unwrap();

    let host = hostname::get().unwrap().to_string_lossy().into_owned();
    assert_eq!(location, format!("s3://encrypted-tokens/{host}_token"));

    let staged = std::fs::read(staging.path().join(format!("{host}_token"))).unwrap();
    assert_eq!(staged, b"ciphertext-bytes");
}

#[tokio::test]
async fn encryption_failure_is_fatal_and_prevents_upload() {
    let kms_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("content-type", "application/x-amz-json-1.1")
                .set_body_string(r#"{"__type":"AccessDeniedException","message":"denied"}"#),
        )
        .expect(1)
        .mount(&kms_server)
        .await;

    let s3_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&s3_server)
        .await;

    let staging = tempfile::tempdir().unwrap();
    let config = test_config();
    let handoff = CredentialHandoff::from_parts(
        kms_client(&kms_server.uri()),
        s3_client(&s3_server.uri()),
        &config,
    )
    .with_staging_dir(staging.path());

    let result = handoff.handoff("abc123").await;
    assert!(matches!(result, Err(BootstrapError::Kms(_))));

    // Nothing may be staged locally when encryption failed
    assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn missing_ciphertext_blob_is_a_contract_violation() {
    let kms_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/x-amz-json-1.1")
                .set_body_string(
                    r#"{"KeyId":"arn:aws:kms:eu-west-1:123456789012:key/test-key"}"#,
                ),
        )
        .mount(&kms_server)
        .await;

    let s3_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&s3_server)
        .await;

    let config = test_config();
    let handoff = CredentialHandoff::from_parts(
        kms_client(&kms_server.uri()),
        s3_client(&s3_server.uri()),
        &config,
    )
    .with_staging_dir(tempfile::tempdir().unwrap().path());

    let result = handoff.handoff("abc123").await;
    assert!(matches!(result, Err(BootstrapError::MissingCiphertext)));
}

#[tokio::test]
async fn upload_failure_is_fatal_despite_successful_encryption() {
    let kms_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(encrypt_ok())
        .expect(1)
        .mount(&kms_server)
        .await;

    let s3_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            r#"<?xml version="1.0"?><Error><Code>InternalError</Code><Message>boom</Message></Error>"#,
        ))
        .expect(1)
        .mount(&s3_server)
        .await;

    let staging = tempfile::tempdir().unwrap();
    let config = test_config();
    let handoff = CredentialHandoff::from_parts(
        kms_client(&kms_server.uri()),
        s3_client(&s3_server.uri()),
        &config,
    )
    .with_staging_dir(staging.path());

    let result = handoff.handoff("abc123").await;
    assert!(matches!(result, Err(BootstrapError::S3(_))));
}
