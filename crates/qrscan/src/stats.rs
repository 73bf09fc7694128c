//! Usage statistics over the scan history.
//!
//! Days are calendar dates in the time zone of the `now` passed in, so the
//! same snapshot can be aggregated for the local zone in production and a
//! fixed zone in tests.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use serde::Serialize;

use crate::record::{ScanKind, ScanRecord};

/// Default look-back window for [`Statistics::recent_days`].
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Default number of days in [`Statistics::daily`].
pub const CHART_DAYS: u32 = 7;

/// Number of scans on one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCount {
    /// The calendar date.
    pub date: NaiveDate,
    /// Records created on that date.
    pub count: usize,
}

/// Aggregated view of the scan history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of records.
    pub total: usize,
    /// Number of favorite records.
    pub favorites: usize,
    /// Record count per kind. Kinds with no records are absent.
    pub by_kind: BTreeMap<ScanKind, usize>,
    /// Distinct dates with at least one record inside the look-back window.
    pub recent_days: usize,
    /// Per-day counts, oldest first, ending today.
    pub daily: Vec<DayCount>,
}

impl Statistics {
    /// Aggregate with the default windows (30 days, 7-day chart).
    #[must_use]
    pub fn compute<Tz: TimeZone>(records: &[ScanRecord], now: &DateTime<Tz>) -> Self {
        Self::compute_with(records, now, Duration::days(RECENT_WINDOW_DAYS), CHART_DAYS)
    }

    /// Aggregate with explicit windows.
    #[must_use]
    pub fn compute_with<Tz: TimeZone>(
        records: &[ScanRecord],
        now: &DateTime<Tz>,
        recent_window: Duration,
        chart_days: u32,
    ) -> Self {
        let tz = now.timezone();
        let local_date = |record: &ScanRecord| record.created_at.with_timezone(&tz).date_naive();

        let mut by_kind = BTreeMap::new();
        for record in records {
            *by_kind.entry(record.kind).or_insert(0) += 1;
        }

        let cutoff = now.clone() - recent_window;
        let recent_days = records
            .iter()
            .filter(|record| record.created_at >= cutoff)
            .map(local_date)
            .collect::<BTreeSet<_>>()
            .len();

        let today = now.date_naive();
        let daily = (0..chart_days)
            .rev()
            .map(|offset| {
                let date = today - Duration::days(i64::from(offset));
                let count = records.iter().filter(|&r| local_date(r) == date).count();
                DayCount { date, count }
            })
            .collect();

        Self {
            total: records.len(),
            favorites: records.iter().filter(|r| r.favorite).count(),
            by_kind,
            recent_days,
            daily,
        }
    }

    /// Share of all records with the given kind, in `0.0..=1.0`.
    ///
    /// Drives the width of the per-kind bar.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn kind_share(&self, kind: ScanKind) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = self.by_kind.get(&kind).copied().unwrap_or(0);
        count as f64 / self.total as f64
    }

    /// Largest daily count, at least 1, for scaling the chart.
    #[must_use]
    pub fn daily_max(&self) -> usize {
        self.daily.iter().map(|d| d.count).max().unwrap_or(0).max(1)
    }
}
