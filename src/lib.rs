// Tally - Cross-store Activity Report Pipeline
// Copyright (c) 2025 Tally Contributors
// Licensed under the MIT License

//! # Tally - cross-store activity report pipeline
//!
//! Tally builds a consolidated activity report by joining a roster of
//! active entities from one PostgreSQL store with daily activity-event
//! counts from a second, independent store, then publishes the result as a
//! CSV artifact in S3-compatible blob storage and records its location in a
//! relational registry.
//!
//! ## Architecture
//!
//! - [`cli`] - command-line interface and argument parsing
//! - [`core`] - business logic (join pipeline, publishing)
//! - [`adapters`] - external integrations (PostgreSQL stores, S3)
//! - [`domain`] - core domain types and the error taxonomy
//! - [`config`] - configuration management
//! - [`logging`] - structured logging
//!
//! ## Pipeline
//!
//! The roster is consumed in fixed-size pages to bound memory; each page is
//! left-joined against its activity aggregation and the parts are
//! reassembled into one globally ordered dataset. The final dataset is
//! identical for any page size over the same store snapshot, so page size
//! is purely a performance knob.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tally::adapters::activity::ActivityAggregator;
//! use tally::adapters::postgres::StoreClient;
//! use tally::adapters::registry::ReportRegistrar;
//! use tally::adapters::roster::RosterReader;
//! use tally::adapters::s3::S3Client;
//! use tally::config::load_config;
//! use tally::core::publish::ArtifactPublisher;
//! use tally::core::report::ReportService;
//! use tally::domain::ReportType;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("tally.toml")?;
//! let roster_client = Arc::new(StoreClient::new(config.roster_store.clone())?);
//! let event_client = Arc::new(StoreClient::new(config.event_store.clone())?);
//! let blob_store = Arc::new(S3Client::new(config.storage.clone())?);
//!
//! let service = ReportService::new(
//!     Arc::new(RosterReader::new(roster_client.clone())),
//!     Arc::new(ActivityAggregator::new(event_client)),
//!     ArtifactPublisher::new(blob_store, Duration::from_secs(config.storage.presign_ttl_seconds)),
//!     Arc::new(ReportRegistrar::new(roster_client)),
//!     config.storage.bucket.clone(),
//!     config.report.clone(),
//! );
//!
//! let download_link = service.generate(ReportType::CustomerActivity).await?;
//! println!("{download_link}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! All fallible operations return [`domain::Result`] with the
//! [`domain::TallyError`] taxonomy: source and aggregation failures abort
//! the run with no partial output; an empty join result is reported before
//! any publish attempt; upload rejection (caller bug) is distinct from
//! upload failure (transport); and a registration failure names the
//! orphaned artifact it leaves behind.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
