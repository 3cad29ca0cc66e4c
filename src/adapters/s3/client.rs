//! S3 blob storage client
//!
//! Talks to the S3 REST API directly over reqwest with SigV4 signing -
//! path-style addressing so the endpoint can be any S3-compatible service.
//!
//! Error mapping follows the pipeline taxonomy: transport and authorization
//! problems become `UploadError::Failed`; malformed bucket/key/metadata -
//! locally validated or rejected by the service with 400/404 - become
//! `UploadError::Rejected`, since retrying the same parameters cannot help.

use crate::adapters::s3::sign::{uri_encode, RequestSigner};
use crate::config::StorageConfig;
use crate::core::publish::ArtifactStore;
use crate::domain::{Result, TallyError, UploadError};
use async_trait::async_trait;
use chrono::Utc;
use secrecy::ExposeSecret;
use std::collections::BTreeMap;
use std::time::Duration;

/// Client for one S3-compatible storage endpoint
pub struct S3Client {
    http: reqwest::Client,
    config: StorageConfig,
}

impl S3Client {
    /// Create a new client from storage configuration
    pub fn new(config: StorageConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| TallyError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        self.config
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://s3.{}.amazonaws.com", self.config.region))
    }

    fn object_path(bucket: &str, key: &str) -> String {
        format!("/{}/{}", bucket, uri_encode(key, false))
    }

    /// Reject malformed parameters before any request leaves the process
    fn validate_object_params(
        bucket: &str,
        key: &str,
        tags: &BTreeMap<String, String>,
    ) -> std::result::Result<(), UploadError> {
        if bucket.is_empty() || bucket.contains('/') {
            return Err(UploadError::Rejected(format!("invalid bucket name: {bucket:?}")));
        }
        if key.is_empty() || key.starts_with('/') {
            return Err(UploadError::Rejected(format!("invalid object key: {key:?}")));
        }
        for (name, value) in tags {
            let name_ok = !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
            if !name_ok {
                return Err(UploadError::Rejected(format!("invalid metadata tag name: {name:?}")));
            }
            if !value.chars().all(|c| c.is_ascii() && !c.is_ascii_control()) {
                return Err(UploadError::Rejected(format!(
                    "metadata value for {name:?} must be printable ASCII"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for S3Client {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        tags: &BTreeMap<String, String>,
    ) -> Result<()> {
        Self::validate_object_params(bucket, key, tags)?;

        let endpoint = self.endpoint();
        let host = endpoint
            .trim_start_matches("https://")
            .trim_start_matches("http://");
        let path = Self::object_path(bucket, key);

        let meta_headers: BTreeMap<String, String> = tags
            .iter()
            .map(|(name, value)| (format!("x-amz-meta-{name}"), value.clone()))
            .collect();

        let secret = self.config.secret_access_key.expose_secret();
        let signer = RequestSigner {
            access_key_id: &self.config.access_key_id,
            secret_access_key: secret.as_ref(),
            region: &self.config.region,
        };
        let signed = signer.sign_put(host, &path, &meta_headers, &body, Utc::now());

        let mut request = self
            .http
            .put(format!("{endpoint}{path}"))
            .header("x-amz-date", &signed.amz_date)
            .header("x-amz-content-sha256", &signed.content_sha256)
            .header("authorization", &signed.authorization);
        for (name, value) in &meta_headers {
            request = request.header(name, value);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| UploadError::Failed(format!("transport error: {e}")))?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(bucket, key, "Object uploaded to blob storage");
            return Ok(());
        }

        let detail = response.text().await.unwrap_or_default();
        let detail = detail.trim();
        match status.as_u16() {
            // NoSuchBucket and parameter validation failures are caller bugs
            400 | 404 => Err(UploadError::Rejected(format!("{status}: {detail}")).into()),
            _ => Err(UploadError::Failed(format!("{status}: {detail}")).into()),
        }
    }

    fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String> {
        Self::validate_object_params(bucket, key, &BTreeMap::new())?;

        let secret = self.config.secret_access_key.expose_secret();
        let signer = RequestSigner {
            access_key_id: &self.config.access_key_id,
            secret_access_key: secret.as_ref(),
            region: &self.config.region,
        };

        Ok(signer.presign_get(
            &self.endpoint(),
            &Self::object_path(bucket, key),
            ttl.as_secs(),
            Utc::now(),
        ))
    }
}
