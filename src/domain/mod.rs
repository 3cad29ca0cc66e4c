//! Domain models and types for Tally
//!
//! Core data shapes for the report pipeline, the error taxonomy, and the
//! `Result` alias used throughout the crate. Adapters translate store rows
//! into these types at the boundary; everything above works only with them.

pub mod errors;
pub mod report;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{StoreError, TallyError, UploadError};
pub use report::{
    ActivityCount, Entity, JoinedRow, ReportEnvelope, ReportMetadata, ReportType,
};
pub use result::Result;
