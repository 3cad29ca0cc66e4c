//! Core business logic
//!
//! - [`report`] - roster paging, activity aggregation, join, orchestration
//! - [`publish`] - artifact serialization, upload, registry recording

pub mod publish;
pub mod report;
