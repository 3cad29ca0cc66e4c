//! Report registrar - persists report metadata to the relational registry
//!
//! One row per successful run, written in a single transaction. The pooled
//! connection is scoped to the call and returns to the pool on every exit
//! path; an uncommitted transaction rolls back when it drops.

use crate::adapters::postgres::StoreClient;
use crate::core::publish::ReportRegistry;
use crate::domain::{ReportMetadata, Result, TallyError};
use async_trait::async_trait;
use std::sync::Arc;

const INSERT_REPORT: &str = "INSERT INTO reports_generated \
     (report_id, storage_key, storage_bucket, report_date, report_type, download_link) \
     VALUES ($1, $2, $3, $4, $5, $6)";

/// Writes report metadata rows
pub struct ReportRegistrar {
    client: Arc<StoreClient>,
}

impl ReportRegistrar {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReportRegistry for ReportRegistrar {
    async fn record(&self, metadata: &ReportMetadata) -> Result<()> {
        let registration_failed = |message: String| TallyError::RegistrationFailed {
            bucket: metadata.storage_bucket.clone(),
            key: metadata.storage_key.clone(),
            message,
        };

        let mut connection = self
            .client
            .get_connection()
            .await
            .map_err(|e| registration_failed(e.to_string()))?;

        let transaction = connection
            .transaction()
            .await
            .map_err(|e| registration_failed(format!("failed to open transaction: {e}")))?;

        let report_type = metadata.report_type.as_str();
        transaction
            .execute(
                INSERT_REPORT,
                &[
                    &metadata.report_id,
                    &metadata.storage_key,
                    &metadata.storage_bucket,
                    &metadata.report_date,
                    &report_type,
                    &metadata.download_reference,
                ],
            )
            .await
            .map_err(|e| registration_failed(format!("insert failed: {e}")))?;

        transaction
            .commit()
            .await
            .map_err(|e| registration_failed(format!("commit failed: {e}")))?;

        tracing::debug!(
            report_id = %metadata.report_id,
            "Report details saved to the registry"
        );
        Ok(())
    }
}
