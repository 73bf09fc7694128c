//! Favorite scans.

use crate::error::{Error, Result};
use crate::record::{ScanPatch, ScanRecord};
use crate::records::ScanStore;
use crate::storage::KeyValueStore;
use crate::views;

use super::{notify, Notice};

/// Favorite scans, narrowed by a search term.
///
/// The list is re-derived from the store after every change, so un-favoriting
/// a record removes it from view immediately.
#[derive(Debug)]
pub struct FavoritesScreen<'a, S: KeyValueStore> {
    store: ScanStore<'a, S>,
    favorites: Vec<ScanRecord>,
    term: String,
}

impl<'a, S: KeyValueStore> FavoritesScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            store: ScanStore::new(backend),
            favorites: Vec::new(),
            term: String::new(),
        }
    }

    /// Load the favorites.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<()> {
        self.favorites = views::favorites(&self.store.list_all()?);
        Ok(())
    }

    /// Change the search term.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Records to display.
    #[must_use]
    pub fn visible(&self) -> Vec<ScanRecord> {
        views::search(&self.favorites, &self.term)
    }

    /// Flip the favorite flag of a record.
    pub fn toggle_favorite(&mut self, id: &str) -> Notice {
        let result = self
            .store
            .get(id)
            .and_then(|found| found.ok_or_else(|| Error::not_found(id)))
            .and_then(|record| self.store.update(id, ScanPatch::favorite(!record.favorite)))
            .and_then(|updated| {
                self.mount()?;
                Ok(updated)
            });

        notify(result, "Could not update favorite", |updated| {
            if updated.favorite {
                Notice::info("Added to favorites")
                    .with_message("The scan was added to your favorites")
            } else {
                Notice::info("Removed from favorites")
                    .with_message("The scan was removed from your favorites")
            }
        })
    }

    /// Delete a record and reload.
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

    #[test]
    fn test_only_favorites_are_listed() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        store.add(ScanDraft::from_decoded("plain")).unwrap();
        let fav = store.add(ScanDraft::from_decoded("starred")).unwrap();
        store.update(&fav.id, ScanPatch::favorite(true)).unwrap();

        let mut screen = FavoritesScreen::new(&backend);
        screen.mount().unwrap();
        let visible = screen.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, fav.id);

        screen.set_search("nothing like it");
        assert!(screen.visible().is_empty());
    }

    #[test]
    fn test_toggle_rederives_view() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let record = store.add(ScanDraft::from_decoded("hello")).unwrap();

        let mut screen = FavoritesScreen::new(&backend);
        screen.mount().unwrap();
        assert!(screen.visible().is_empty());

        let notice = screen.toggle_favorite(&record.id);
        assert_eq!(notice.title, "Added to favorites");
        assert_eq!(screen.visible().len(), 1);

        let notice = screen.toggle_favorite(&record.id);
        assert_eq!(notice.title, "Removed from favorites");
        assert!(screen.visible().is_empty());
        assert!(!store.get(&record.id).unwrap().unwrap().favorite);
    }

    #[test]
    fn test_toggle_missing_is_error_notice() {
        let backend = MemoryStore::new();
        let mut screen = FavoritesScreen::new(&backend);
        screen.mount().unwrap();

        let notice = screen.toggle_favorite("missing");
        assert!(notice.is_error());
    }

    #[test]
    fn test_delete() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let record = store.add(ScanDraft::from_decoded("hello")).unwrap();
        store.update(&record.id, ScanPatch::favorite(true)).unwrap();

        let mut screen = FavoritesScreen::new(&backend);
        screen.mount().unwrap();
        assert!(!screen.delete(&record.id).is_error());
        assert!(screen.visible().is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }
}
