//! The scan record store.
//!
//! Records are persisted as one JSON array under the `scans` key, newest
//! first. Each operation reads the array, modifies it and writes it back before
//! returning.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::record::{ScanDraft, ScanPatch, ScanRecord};
use crate::storage::schema::KEY_SCANS;
use crate::storage::KeyValueStore;

/// Typed access to the scan history held in a [`KeyValueStore`].
#[derive(Debug)]
pub struct ScanStore<'a, S: KeyValueStore> {
    backend: &'a S,
}

impl<'a, S: KeyValueStore> ScanStore<'a, S> {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self { backend }
    }

    /// All records, newest first. Empty if nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails or the stored array is corrupt.
    pub fn list_all(&self) -> Result<Vec<ScanRecord>> {
        Ok(self.backend.get_json(KEY_SCANS)?.unwrap_or_default())
    }

    /// Look up a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get(&self, id: &str) -> Result<Option<ScanRecord>> {
        Ok(self.list_all()?.into_iter().find(|record| record.id == id))
    }

    /// Create a record from `draft` and put it at the front of the history.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read or write fails.
    pub fn add(&self, draft: ScanDraft) -> Result<ScanRecord> {
        let mut records = self.list_all()?;
        let record = ScanRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            content: draft.content,
            kind: draft.kind,
            title: draft.title,
            favorite: draft.favorite,
        };

        records.insert(0, record.clone());
        self.save(&records)?;

        info!("Recorded {} scan {}", record.kind, record.id);
        Ok(record)
    }

    /// Merge `patch` into the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no record has this id; the store is left
    /// untouched. Backend failures are propagated.
    pub fn update(&self, id: &str, patch: ScanPatch) -> Result<ScanRecord> {
        let mut records = self.list_all()?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            warn!("Update of unknown scan {}", id);
            return Err(Error::not_found(id));
        };

        patch.apply_to(record);
        let updated = record.clone();
        self.save(&records)?;

        debug!("Updated scan {}", id);
        Ok(updated)
    }

    /// Remove the record with the given id.
    ///
    /// Returns `false` if there was nothing to remove.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read or write fails.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.list_all()?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            debug!("Delete of unknown scan {}", id);
            return Ok(false);
        }

        self.save(&records)?;
        debug!("Deleted scan {}", id);
        Ok(true)
    }

    /// Remove every record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn clear(&self) -> Result<()> {
        self.save(&[])?;
        info!("Cleared scan history");
        Ok(())
    }

    fn save(&self, records: &[ScanRecord]) -> Result<()> {
        self.backend.set_json(KEY_SCANS, &records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ScanKind;
    use crate::storage::{MemoryStore, Storage};

    fn draft(content: &str) -> ScanDraft {
        ScanDraft::from_decoded(content)
    }

    #[test]
    fn test_list_all_empty() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_add_assigns_id_and_prepends() {
        crate::logging::init_test_logging();
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);

        let first = store.add(draft("first")).unwrap();
        let second = store.add(draft("https://second.example")).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(second.kind, ScanKind::Url);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
        assert!(all[0].created_at >= all[1].created_at);
    }

    #[test]
    fn test_get() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let record = store.add(draft("hello")).unwrap();

        assert_eq!(store.get(&record.id).unwrap(), Some(record));
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_update_favorite() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let record = store.add(draft("hello")).unwrap();

        let updated = store.update(&record.id, ScanPatch::favorite(true)).unwrap();
        assert!(updated.favorite);
        assert_eq!(updated.id, record.id);
        assert_eq!(updated.created_at, record.created_at);

        let stored = store.get(&record.id).unwrap().unwrap();
        assert!(stored.favorite);
    }

    #[test]
    fn test_update_missing_is_not_found_and_leaves_store() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        store.add(draft("hello")).unwrap();
        let before = store.list_all().unwrap();

        let err = store
            .update("missing", ScanPatch::favorite(true))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.list_all().unwrap(), before);
    }

    #[test]
    fn test_delete_twice() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let record = store.add(draft("hello")).unwrap();

        assert!(store.delete(&record.id).unwrap());
        assert!(!store.delete(&record.id).unwrap());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_clear() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        for i in 0..5 {
            store.add(draft(&format!("scan {i}"))).unwrap();
        }

        store.clear().unwrap();
        assert!(store.list_all().unwrap().is_empty());

        // Clearing an empty store is fine too
        store.clear().unwrap();
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn test_sqlite_backend() {
        let backend = Storage::open_in_memory().unwrap();
        let store = ScanStore::new(&backend);

        let record = store.add(draft("tel:+33600000000")).unwrap();
        assert_eq!(record.kind, ScanKind::Phone);
        assert_eq!(store.list_all().unwrap(), vec![record]);
    }

    #[test]
    fn test_reads_existing_array() {
        let backend = MemoryStore::new();
        backend
            .set(
                KEY_SCANS,
                r#"[{"id":"1700000000000","created_at":"2024-01-15T10:00:00.000Z",
                    "content":"geo:1,2","type":"location","title":"Here","favorite":true}]"#,
            )
            .unwrap();

        let all = ScanStore::new(&backend).list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind, ScanKind::Location);
        assert!(all[0].favorite);
    }
}
