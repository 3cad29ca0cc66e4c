//! Domain error types
//!
//! Every component wraps store- and transport-specific failures into one of
//! the conditions below; nothing above the adapter layer sees a
//! `tokio_postgres` or `reqwest` error type. The orchestrator does not catch
//! these - they propagate to the entry point, which prints a message and
//! exits non-zero. There is no automatic retry anywhere in the pipeline.

use thiserror::Error;

/// Main Tally error type
///
/// One variant per failure condition of the report pipeline, plus the
/// ambient configuration and I/O cases.
#[derive(Debug, Error)]
pub enum TallyError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The entity store was unreachable or rejected the roster query.
    /// Fatal to the run; no partial page is surfaced.
    #[error("Entity store unavailable: {0}")]
    SourceUnavailable(String),

    /// The event store rejected the aggregation query. Aborts the whole
    /// run, not just the current page - partial output would silently
    /// under-report activity.
    #[error("Activity aggregation query failed: {0}")]
    AggregationQueryFailed(String),

    /// The join produced zero rows. Reported before any publish attempt so
    /// an empty artifact is never uploaded or registered.
    #[error("Report dataset is empty; nothing was published")]
    EmptyResult,

    /// Artifact upload errors
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// The artifact was uploaded but its registry row could not be
    /// persisted. The object named here is orphaned: it exists in blob
    /// storage with no registry entry.
    #[error("Report registration failed for s3://{bucket}/{key}: {message}")]
    RegistrationFailed {
        bucket: String,
        key: String,
        message: String,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Blob-storage upload errors
///
/// `Failed` covers transport and authorization problems. `Rejected` means
/// the request itself was malformed (bad bucket, key, or metadata), which
/// indicates a caller bug rather than a transient condition.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Transport or authorization failure while uploading
    #[error("upload failed: {0}")]
    Failed(String),

    /// The storage service rejected the request parameters
    #[error("upload rejected: {0}")]
    Rejected(String),
}

/// Low-level store access failure
///
/// Produced by the pooled PostgreSQL client; each adapter wraps it into the
/// pipeline condition appropriate for its phase.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        TallyError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for TallyError {
    fn from(err: toml::de::Error) -> Self {
        TallyError::Configuration(format!("TOML parse error: {err}"))
    }
}
