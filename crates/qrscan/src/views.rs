//! Read-only projections over a snapshot of the scan history.
//!
//! None of these touch storage except [`compare_by_id`], which only reads.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::record::ScanRecord;
use crate::records::ScanStore;
use crate::storage::KeyValueStore;

/// Records marked as favorite, in their original order.
#[must_use]
pub fn favorites(records: &[ScanRecord]) -> Vec<ScanRecord> {
    records.iter().filter(|r| r.favorite).cloned().collect()
}

/// Records whose title or content contains `term`, ignoring case.
///
/// An empty term matches everything.
#[must_use]
pub fn search(records: &[ScanRecord], term: &str) -> Vec<ScanRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| r.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// One way two records differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difference {
    /// The kinds are not the same.
    KindDiffers,
    /// The payloads are not the same.
    ContentDiffers,
}

impl Difference {
    /// Short description.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::KindDiffers => "kind differs",
            Self::ContentDiffers => "content differs",
        }
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compare two records on kind and content only.
///
/// An empty result means the records are equivalent; titles, timestamps and
/// favorite flags are not compared.
#[must_use]
pub fn compare(a: &ScanRecord, b: &ScanRecord) -> Vec<Difference> {
    let mut differences = Vec::new();
    if a.kind != b.kind {
        differences.push(Difference::KindDiffers);
    }
    if a.content != b.content {
        differences.push(Difference::ContentDiffers);
    }
    differences
}

/// Resolve two ids from the store and compare the records.
///
/// # Errors
///
/// Returns [`Error::NotFound`] naming the first id that does not resolve.
pub fn compare_by_id<S: KeyValueStore>(
    store: &ScanStore<'_, S>,
    first: &str,
    second: &str,
) -> Result<Vec<Difference>> {
    let records = store.list_all()?;
    let find = |id: &str| {
        records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::not_found(id))
    };
    Ok(compare(find(first)?, find(second)?))
}
