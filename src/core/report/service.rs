//! Report service - orchestrator for one report run
//!
//! A simple finite sequence, not a state machine: build the metadata
//! envelope, run the join, fail fast on an empty dataset, publish the
//! artifact, register the metadata, return the download reference. Each
//! step is attempted at most once and failure aborts all subsequent steps;
//! there is no compensation or rollback of earlier steps.

use crate::config::ReportConfig;
use crate::core::publish::{ArtifactPublisher, ReportRegistry};
use crate::core::report::{ActivitySource, JoinEngine, JoinOutcome, ReportWindow, RosterSource};
use crate::domain::{ReportEnvelope, ReportType, Result, TallyError};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Orchestrates the join-and-publish pipeline
pub struct ReportService {
    roster: Arc<dyn RosterSource>,
    activity: Arc<dyn ActivitySource>,
    publisher: ArtifactPublisher,
    registry: Arc<dyn ReportRegistry>,
    storage_bucket: String,
    report: ReportConfig,
}

impl ReportService {
    pub fn new(
        roster: Arc<dyn RosterSource>,
        activity: Arc<dyn ActivitySource>,
        publisher: ArtifactPublisher,
        registry: Arc<dyn ReportRegistry>,
        storage_bucket: String,
        report: ReportConfig,
    ) -> Self {
        Self {
            roster,
            activity,
            publisher,
            registry,
            storage_bucket,
            report,
        }
    }

    /// Generate one report and return its signed download reference
    pub async fn generate(&self, report_type: ReportType) -> Result<String> {
        let started = Instant::now();
        let today = Utc::now().date_naive();
        let envelope = ReportEnvelope::new(report_type, self.storage_bucket.clone(), today);

        tracing::info!(
            report_id = %envelope.report_id,
            report_type = %envelope.report_type,
            key = %envelope.storage_key,
            "Starting report run"
        );

        let window = ReportWindow::trailing_days(today, self.report.window_days);
        let engine = JoinEngine::new(
            self.roster.as_ref(),
            self.activity.as_ref(),
            self.report.page_size,
        );

        let dataset = match engine.run(&window).await? {
            JoinOutcome::Rows(rows) => rows,
            JoinOutcome::Empty => {
                tracing::error!(
                    report_id = %envelope.report_id,
                    "Join produced zero rows; aborting before publish"
                );
                return Err(TallyError::EmptyResult);
            }
        };

        let download_reference = self.publisher.publish(&dataset, &envelope).await?;

        let metadata = envelope.into_metadata(download_reference.clone());
        self.registry.record(&metadata).await?;

        tracing::info!(
            report_id = %metadata.report_id,
            rows = dataset.len(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Report run complete"
        );

        Ok(download_reference)
    }
}
