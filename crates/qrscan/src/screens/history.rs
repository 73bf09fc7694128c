//! The scan history list.

use crate::error::Result;
use crate::record::ScanRecord;
use crate::records::ScanStore;
use crate::storage::KeyValueStore;
use crate::views;

use super::{notify, Notice};

/// Every scan, newest first, narrowed by a search term.
#[derive(Debug)]
pub struct HistoryScreen<'a, S: KeyValueStore> {
    store: ScanStore<'a, S>,
    records: Vec<ScanRecord>,
    term: String,
}

impl<'a, S: KeyValueStore> HistoryScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            store: ScanStore::new(backend),
            records: Vec::new(),
            term: String::new(),
        }
    }

    /// Load the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<()> {
        self.records = self.store.list_all()?;
        Ok(())
    }

    /// Change the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// The current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.term
    }

    /// Records to display.
    #[must_use]
    pub fn visible(&self) -> Vec<ScanRecord> {
        views::search(&self.records, &self.term)
    }

    /// Number of records before searching.
    #[must_use]
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Delete one record and reload.
    pub fn delete(&mut self, id: &str) -> Notice {
        let result = self.store.delete(id).and_then(|removed| {
            self.mount()?;
            Ok(removed)
        });
        notify(result, "Could not delete scan", |removed| {
            if removed {
                Notice::info("Deleted").with_message("The scan was removed from your history")
            } else {
                Notice::error("Scan not found")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ScanDraft;
    use crate::storage::MemoryStore;

    fn seeded() -> MemoryStore {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        for content in ["https://rust-lang.org", "tel:+33600000000", "hello world"] {
            store.add(ScanDraft::from_decoded(content)).unwrap();
        }
        backend
    }

    #[test]
    fn test_mount_lists_newest_first() {
        let backend = seeded();
        let mut screen = HistoryScreen::new(&backend);
        screen.mount().unwrap();

        let visible = screen.visible();
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[0].content, "hello world");
        assert_eq!(visible[2].content, "https://rust-lang.org");
    }

    #[test]
    fn test_search() {
        let backend = seeded();
        let mut screen = HistoryScreen::new(&backend);
        screen.mount().unwrap();

        screen.set_search("RUST");
        assert_eq!(screen.visible().len(), 1);
        assert_eq!(screen.total(), 3);

        screen.set_search("");
        assert_eq!(screen.visible().len(), 3);
    }

    #[test]
    fn test_delete_reloads() {
        let backend = seeded();
        let mut screen = HistoryScreen::new(&backend);
        screen.mount().unwrap();
        let id = screen.visible()[0].id.clone();

        let notice = screen.delete(&id);
        assert!(!notice.is_error());
        assert_eq!(screen.total(), 2);

        let notice = screen.delete(&id);
        assert!(notice.is_error());
        assert_eq!(screen.total(), 2);
    }
}
