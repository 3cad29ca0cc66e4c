//! Activity aggregator - daily event counts from the event store
//!
//! The grouping key is `(entity_id, occurred_on)`; ordering by that
//! composite key is part of the contract - the join engine relies on
//! ascending dates within an entity for its deterministic merge.

use crate::adapters::postgres::StoreClient;
use crate::core::report::{ActivitySource, ReportWindow};
use crate::domain::{ActivityCount, Result, TallyError};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

const DAILY_COUNT_QUERY: &str = "SELECT entity_id, occurred_on, COUNT(activity_id) AS events \
     FROM activity_events \
     WHERE entity_id = ANY($1) \
       AND occurred_on >= $2 \
       AND occurred_on < $3 \
     GROUP BY entity_id, occurred_on \
     ORDER BY entity_id, occurred_on";

/// Aggregating reader over the event store
pub struct ActivityAggregator {
    client: Arc<StoreClient>,
}

impl ActivityAggregator {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ActivitySource for ActivityAggregator {
    async fn daily_counts(
        &self,
        entity_ids: &[i64],
        window: &ReportWindow,
    ) -> Result<Vec<ActivityCount>> {
        let start = window.start();
        let end = window.end();

        let rows = self
            .client
            .query(DAILY_COUNT_QUERY, &[&entity_ids, &start, &end])
            .await
            .map_err(|e| TallyError::AggregationQueryFailed(e.to_string()))?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in rows {
            let entity_id: i64 = row
                .try_get("entity_id")
                .map_err(|e| TallyError::AggregationQueryFailed(format!("bad count row: {e}")))?;
            let date: NaiveDate = row
                .try_get("occurred_on")
                .map_err(|e| TallyError::AggregationQueryFailed(format!("bad count row: {e}")))?;
            let events: i64 = row
                .try_get("events")
                .map_err(|e| TallyError::AggregationQueryFailed(format!("bad count row: {e}")))?;

            // Fail loudly instead of truncating an implausible count
            let count = u32::try_from(events).map_err(|_| {
                TallyError::AggregationQueryFailed(format!(
                    "daily event count {events} for entity {entity_id} out of range"
                ))
            })?;

            counts.push(ActivityCount {
                entity_id,
                date,
                count,
            });
        }

        tracing::debug!(
            entities = entity_ids.len(),
            count_rows = counts.len(),
            "Aggregated daily activity counts"
        );
        Ok(counts)
    }
}
