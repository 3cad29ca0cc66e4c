//! Publishing: artifact serialization, upload, and registry recording

pub mod csv;
pub mod publisher;

pub use publisher::ArtifactPublisher;

use crate::domain::{ReportMetadata, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// Blob storage for published artifacts
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Upload `body` to `bucket`/`key`, attaching `tags` as object metadata
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        tags: &BTreeMap<String, String>,
    ) -> Result<()>;

    /// Mint a time-limited signed download URL for `bucket`/`key`
    fn presign_get(&self, bucket: &str, key: &str, ttl: Duration) -> Result<String>;
}

/// Relational registry of generated reports
#[async_trait]
pub trait ReportRegistry: Send + Sync {
    /// Persist one metadata row for a completed run
    async fn record(&self, metadata: &ReportMetadata) -> Result<()>;
}
