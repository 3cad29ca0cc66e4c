//! Roster reader - paginated access to the active-entity roster
//!
//! Keyset pagination (`id > $after ORDER BY id LIMIT $n`) keeps pages
//! non-overlapping and partitions the roster into disjoint id ranges, so
//! the union of pages covers exactly the active roster at query time.

use crate::adapters::postgres::StoreClient;
use crate::core::report::RosterSource;
use crate::domain::{Entity, Result, TallyError};
use async_trait::async_trait;
use std::sync::Arc;

const PAGE_QUERY: &str = "SELECT id, name \
     FROM entities \
     WHERE active_status = 'active' AND id > $1 \
     ORDER BY id \
     LIMIT $2";

/// Paginated reader over the entity store
pub struct RosterReader {
    client: Arc<StoreClient>,
}

impl RosterReader {
    pub fn new(client: Arc<StoreClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RosterSource for RosterReader {
    async fn fetch_page(&self, after: Option<i64>, limit: u32) -> Result<Vec<Entity>> {
        let after = after.unwrap_or(i64::MIN);
        let limit = i64::from(limit);

        let rows = self
            .client
            .query(PAGE_QUERY, &[&after, &limit])
            .await
            .map_err(|e| TallyError::SourceUnavailable(e.to_string()))?;

        let mut entities = Vec::with_capacity(rows.len());
        for row in rows {
            entities.push(Entity {
                id: row
                    .try_get("id")
                    .map_err(|e| TallyError::SourceUnavailable(format!("bad roster row: {e}")))?,
                name: row
                    .try_get("name")
                    .map_err(|e| TallyError::SourceUnavailable(format!("bad roster row: {e}")))?,
            });
        }

        tracing::debug!(after, count = entities.len(), "Fetched roster page");
        Ok(entities)
    }
}
