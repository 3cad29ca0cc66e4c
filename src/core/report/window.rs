//! Report window
//!
//! Half-open date range `[start, end)` over which activity is aggregated.
//! The upper bound always excludes the current date, so counts reflect
//! completed days only and a partially elapsed day never under-reports.

use chrono::{Days, NaiveDate};

/// Half-open aggregation window `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportWindow {
    /// Window covering the `days` days before `today`, excluding `today`
    pub fn trailing_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// Inclusive lower bound
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive upper bound (the current date at run time)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls inside the window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}
