//! Artifact publisher
//!
//! Serializes the final dataset, uploads it to blob storage under the
//! envelope's bucket/key, and mints the signed download reference. Each
//! step can fail independently; a partially uploaded object is never
//! cleaned up on downstream failure.

use crate::core::publish::{csv, ArtifactStore};
use crate::domain::{JoinedRow, ReportEnvelope, Result};
use std::sync::Arc;
use std::time::Duration;

/// Uploads serialized report datasets and mints download references
pub struct ArtifactPublisher {
    store: Arc<dyn ArtifactStore>,
    presign_ttl: Duration,
}

impl ArtifactPublisher {
    pub fn new(store: Arc<dyn ArtifactStore>, presign_ttl: Duration) -> Self {
        Self { store, presign_ttl }
    }

    /// Publish `dataset` under the envelope's bucket/key
    ///
    /// Returns the signed download reference for the object just uploaded -
    /// always the same bucket/key the upload targeted.
    pub async fn publish(&self, dataset: &[JoinedRow], envelope: &ReportEnvelope) -> Result<String> {
        let body = csv::serialize_dataset(dataset);

        self.store
            .put_object(
                &envelope.storage_bucket,
                &envelope.storage_key,
                body.into_bytes(),
                &envelope.tag_map(),
            )
            .await?;

        tracing::debug!(
            bucket = %envelope.storage_bucket,
            key = %envelope.storage_key,
            rows = dataset.len(),
            "Report artifact uploaded"
        );

        self.store
            .presign_get(&envelope.storage_bucket, &envelope.storage_key, self.presign_ttl)
    }
}
