//! Report domain models
//!
//! Rows flowing through the pipeline (`Entity`, `ActivityCount`,
//! `JoinedRow`) and the report identity types (`ReportType`,
//! `ReportEnvelope`, `ReportMetadata`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// An active entity from the roster store
///
/// Only `active_status = 'active'` rows ever reach the pipeline; the filter
/// is applied in the roster query, so the status column is not carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: i64,
    pub name: String,
}

/// Count of activity events for one entity on one day
///
/// Produced by the aggregation query, ordered by `(entity_id, date)`
/// ascending. Multiple same-day events are counted, never deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    pub entity_id: i64,
    pub date: NaiveDate,
    /// u32 leaves plenty of headroom; narrower widths silently truncate
    /// entities with heavy same-day activity.
    pub count: u32,
}

/// One row of the final joined dataset
///
/// Left-join semantics: an entity with no in-window activity still appears
/// once, with `activity_count` and `activity_date` both `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinedRow {
    pub entity_id: i64,
    pub entity_name: String,
    pub activity_count: Option<u32>,
    pub activity_date: Option<NaiveDate>,
}

/// The closed set of valid report types
///
/// Currently a single member; the enum exists so the CLI can enumerate the
/// valid tokens and reject anything else before any work is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    CustomerActivity,
}

impl ReportType {
    /// Token used on the command line and in storage keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::CustomerActivity => "customer_activity",
        }
    }

    /// All valid report-type tokens, for CLI error messages
    pub fn tokens() -> Vec<&'static str> {
        vec![ReportType::CustomerActivity.as_str()]
    }

    /// Deterministic object key for a report of this type on `date`
    pub fn storage_key(&self, date: NaiveDate) -> String {
        format!("{}_report/{}.csv", self.as_str(), date.format("%Y-%m-%d"))
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer_activity" => Ok(ReportType::CustomerActivity),
            other => Err(format!("unknown report type: {other}")),
        }
    }
}

/// Identity and storage location of one report run, minted before the join
///
/// The envelope exists for the whole run; the download reference is only
/// known after publishing, at which point the envelope becomes a
/// [`ReportMetadata`].
#[derive(Debug, Clone)]
pub struct ReportEnvelope {
    pub report_id: Uuid,
    pub report_type: ReportType,
    pub report_date: NaiveDate,
    pub storage_bucket: String,
    pub storage_key: String,
}

impl ReportEnvelope {
    /// Mint a new envelope with a fresh report id and the deterministic
    /// storage key for `report_date`
    pub fn new(report_type: ReportType, storage_bucket: String, report_date: NaiveDate) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            report_type,
            report_date,
            storage_key: report_type.storage_key(report_date),
            storage_bucket,
        }
    }

    /// Tag map attached to the uploaded object as metadata
    pub fn tag_map(&self) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("report-id".to_string(), self.report_id.to_string()),
            ("report-type".to_string(), self.report_type.to_string()),
            ("report-date".to_string(), self.report_date.to_string()),
            ("storage-key".to_string(), self.storage_key.clone()),
        ])
    }

    /// Complete the envelope with the signed download reference
    pub fn into_metadata(self, download_reference: String) -> ReportMetadata {
        ReportMetadata {
            report_id: self.report_id,
            report_type: self.report_type,
            report_date: self.report_date,
            storage_bucket: self.storage_bucket,
            storage_key: self.storage_key,
            download_reference,
        }
    }
}

/// Metadata record persisted to the registry, one row per successful run
///
/// Immutable after creation; persisted exactly once.
#[derive(Debug, Clone)]
pub struct ReportMetadata {
    pub report_id: Uuid,
    pub report_type: ReportType,
    pub report_date: NaiveDate,
    pub storage_bucket: String,
    pub storage_key: String,
    pub download_reference: String,
}
