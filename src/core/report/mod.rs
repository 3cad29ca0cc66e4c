//! Report pipeline: roster paging, activity aggregation, join, orchestration
//!
//! The traits here are the seams between the pipeline and the stores. The
//! PostgreSQL adapters implement them in production; tests supply in-memory
//! fakes.

pub mod join;
pub mod service;
pub mod window;

pub use join::{JoinEngine, JoinOutcome};
pub use service::ReportService;
pub use window::ReportWindow;

use crate::domain::{ActivityCount, Entity, Result};
use async_trait::async_trait;

/// Read access to the active-entity roster
#[async_trait]
pub trait RosterSource: Send + Sync {
    /// Fetch the next roster page: at most `limit` active entities with id
    /// greater than `after`, ordered by id ascending.
    ///
    /// Pages obtained this way are non-overlapping and their union covers
    /// exactly the active roster at query time. An empty page means the
    /// roster is exhausted.
    async fn fetch_page(&self, after: Option<i64>, limit: u32) -> Result<Vec<Entity>>;
}

/// Read access to daily activity-event counts
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Per-(entity, day) event counts for `entity_ids` within `window`,
    /// ordered by `(entity_id, date)` ascending. Entities with no events in
    /// the window are simply absent from the result.
    async fn daily_counts(
        &self,
        entity_ids: &[i64],
        window: &ReportWindow,
    ) -> Result<Vec<ActivityCount>>;
}
