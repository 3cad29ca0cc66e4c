//! Join engine
//!
//! Consumes the roster page by page, left-joins each page against its
//! activity aggregation, and reassembles the parts into one globally
//! ordered dataset.
//!
//! Chunking bounds peak memory to one roster page plus its joined activity,
//! independent of roster size. The stable global sort after concatenation
//! makes the output identical to a non-chunked single-query join, so page
//! size is purely a performance knob with no observable effect.

use crate::core::report::window::ReportWindow;
use crate::core::report::{ActivitySource, RosterSource};
use crate::domain::{ActivityCount, Entity, JoinedRow, Result};
use std::collections::BTreeMap;

/// Outcome of a join run
///
/// A zero-row dataset is a distinct, valid outcome - not an error raised
/// mid-join - so callers cannot mistake an empty roster for a query failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    /// At least one joined row, sorted by entity id ascending and by
    /// activity date ascending within an entity
    Rows(Vec<JoinedRow>),
    /// The roster and join produced nothing
    Empty,
}

/// Chunked cross-store join
pub struct JoinEngine<'a> {
    roster: &'a dyn RosterSource,
    activity: &'a dyn ActivitySource,
    page_size: u32,
}

impl<'a> JoinEngine<'a> {
    pub fn new(
        roster: &'a dyn RosterSource,
        activity: &'a dyn ActivitySource,
        page_size: u32,
    ) -> Self {
        Self {
            roster,
            activity,
            page_size,
        }
    }

    /// Run the join over the full roster
    ///
    /// Roster and aggregation failures propagate unchanged; a failure on any
    /// page aborts the entire run with no partial dataset surfaced.
    pub async fn run(&self, window: &ReportWindow) -> Result<JoinOutcome> {
        let mut dataset: Vec<JoinedRow> = Vec::new();
        let mut after: Option<i64> = None;
        let mut pages = 0usize;

        loop {
            let page = self.roster.fetch_page(after, self.page_size).await?;
            let Some(last) = page.last() else {
                break;
            };
            after = Some(last.id);
            pages += 1;

            let ids: Vec<i64> = page.iter().map(|e| e.id).collect();
            let counts = self.activity.daily_counts(&ids, window).await?;
            dataset.extend(join_page(&page, &counts));

            tracing::debug!(
                page = pages,
                entities = page.len(),
                count_rows = counts.len(),
                "Joined roster page"
            );

            // A short page is necessarily the last one
            if page.len() < self.page_size as usize {
                break;
            }
        }

        // Stable sort: per-entity date rows keep the ascending order the
        // aggregation query established, so the result is independent of
        // how the roster was paged.
        dataset.sort_by_key(|row| row.entity_id);

        tracing::info!(pages, rows = dataset.len(), "Join complete");

        if dataset.is_empty() {
            Ok(JoinOutcome::Empty)
        } else {
            Ok(JoinOutcome::Rows(dataset))
        }
    }
}

/// Left-join one roster page against its activity counts
///
/// Every entity appears at least once: entities without counts get a single
/// row with null count and date. Count rows for an entity are emitted in
/// the order they arrive, which is ascending by date.
fn join_page(entities: &[Entity], counts: &[ActivityCount]) -> Vec<JoinedRow> {
    let mut by_entity: BTreeMap<i64, Vec<&ActivityCount>> = BTreeMap::new();
    for count in counts {
        by_entity.entry(count.entity_id).or_default().push(count);
    }

    let mut rows = Vec::with_capacity(entities.len());
    for entity in entities {
        match by_entity.get(&entity.id) {
            Some(days) => {
                for count in days {
                    rows.push(JoinedRow {
                        entity_id: entity.id,
                        entity_name: entity.name.clone(),
                        activity_count: Some(count.count),
                        activity_date: Some(count.date),
                    });
                }
            }
            None => rows.push(JoinedRow {
                entity_id: entity.id,
                entity_name: entity.name.clone(),
                activity_count: None,
                activity_date: None,
            }),
        }
    }
    rows
}
