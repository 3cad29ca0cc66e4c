//! Generate command implementation
//!
//! Wires the store adapters into the report service and runs one report.
//! An unknown report-type token prints the valid set and exits without
//! attempting any work.

use crate::adapters::activity::ActivityAggregator;
use crate::adapters::postgres::StoreClient;
use crate::adapters::registry::ReportRegistrar;
use crate::adapters::roster::RosterReader;
use crate::adapters::s3::S3Client;
use crate::config::load_config;
use crate::core::publish::ArtifactPublisher;
use crate::core::report::ReportService;
use crate::domain::ReportType;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

/// Arguments for the generate command
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Report type to generate; defaults to customer_activity
    pub report_type: Option<String>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let report_type = match &self.report_type {
            None => ReportType::default(),
            Some(token) => match token.parse::<ReportType>() {
                Ok(report_type) => report_type,
                Err(_) => {
                    eprintln!(
                        "Please enter a valid report type. Available report types: {}",
                        ReportType::tokens().join(", ")
                    );
                    return Ok(2);
                }
            },
        };

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        tracing::info!(
            report_type = %report_type,
            roster_store = %config.roster_store.connection_string_safe(),
            event_store = %config.event_store.connection_string_safe(),
            bucket = %config.storage.bucket,
            "Starting generate command"
        );

        // One pooled client per store; the roster database also hosts the
        // report registry.
        let roster_client = Arc::new(StoreClient::new(config.roster_store.clone())?);
        let event_client = Arc::new(StoreClient::new(config.event_store.clone())?);

        let presign_ttl = Duration::from_secs(config.storage.presign_ttl_seconds);
        let blob_store = Arc::new(S3Client::new(config.storage.clone())?);

        let service = ReportService::new(
            Arc::new(RosterReader::new(roster_client.clone())),
            Arc::new(ActivityAggregator::new(event_client)),
            ArtifactPublisher::new(blob_store, presign_ttl),
            Arc::new(ReportRegistrar::new(roster_client)),
            config.storage.bucket.clone(),
            config.report.clone(),
        );

        match service.generate(report_type).await {
            Ok(download_reference) => {
                println!("{download_reference}");
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Report generation failed");
                eprintln!("Error: {e}");
                Ok(1)
            }
        }
    }
}
