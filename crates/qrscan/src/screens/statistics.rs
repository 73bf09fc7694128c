//! Usage statistics.

use chrono::{DateTime, Duration, Local, TimeZone};

use crate::error::Result;
use crate::records::ScanStore;
use crate::stats::{Statistics, CHART_DAYS, RECENT_WINDOW_DAYS};
use crate::storage::KeyValueStore;

/// Statistics computed from the history when the screen is mounted.
#[derive(Debug)]
pub struct StatisticsScreen<'a, S: KeyValueStore> {
    store: ScanStore<'a, S>,
    recent_window: Duration,
    chart_days: u32,
    stats: Option<Statistics>,
}

impl<'a, S: KeyValueStore> StatisticsScreen<'a, S> {
    /// Create an unmounted screen with the default windows.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            store: ScanStore::new(backend),
            recent_window: Duration::days(RECENT_WINDOW_DAYS),
            chart_days: CHART_DAYS,
            stats: None,
        }
    }

    /// Override the look-back window and chart length.
    #[must_use]
    pub fn with_windows(mut self, recent_window: Duration, chart_days: u32) -> Self {
        self.recent_window = recent_window;
        self.chart_days = chart_days;
        self
    }

    /// Compute statistics for the local time zone.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<&Statistics> {
        self.mount_at(&Local::now())
    }

    /// Compute statistics as of `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount_at<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Result<&Statistics> {
        let records = self.store.list_all()?;
        let stats = Statistics::compute_with(&records, now, self.recent_window, self.chart_days);
        Ok(self.stats.insert(stats))
    }

    /// Last computed statistics.
    #[must_use]
    pub fn stats(&self) -> Option<&Statistics> {
        self.stats.as_ref()
    }
}
