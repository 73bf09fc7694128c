//! Side-by-side comparison of two scans.

use crate::error::{Error, Result};
use crate::record::ScanRecord;
use crate::records::ScanStore;
use crate::storage::KeyValueStore;
use crate::views::{self, Difference};

use super::Notice;

/// One of the two comparison slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Left-hand scan.
    A,
    /// Right-hand scan.
    B,
}

/// Pick two scans and list how they differ.
#[derive(Debug)]
pub struct CompareScreen<'a, S: KeyValueStore> {
    store: ScanStore<'a, S>,
    candidates: Vec<ScanRecord>,
    a: Option<ScanRecord>,
    b: Option<ScanRecord>,
}

impl<'a, S: KeyValueStore> CompareScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            store: ScanStore::new(backend),
            candidates: Vec::new(),
            a: None,
            b: None,
        }
    }

    /// Load the scans available for selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<()> {
        self.candidates = self.store.list_all()?;
        Ok(())
    }

    /// Scans that can be placed in a slot.
    #[must_use]
    pub fn candidates(&self) -> &[ScanRecord] {
        &self.candidates
    }

    /// Put the scan with `id` into `slot`.
    ///
    /// Returns an error notice if the id is not among the candidates.
    pub fn select(&mut self, slot: Slot, id: &str) -> Option<Notice> {
        let Some(record) = self.candidates.iter().find(|r| r.id == id).cloned() else {
            return Some(Notice::from_error("Scan not found", &Error::not_found(id)));
        };
        *self.slot_mut(slot) = Some(record);
        None
    }

    /// Empty `slot`.
    pub fn clear(&mut self, slot: Slot) {
        *self.slot_mut(slot) = None;
    }

    /// The scan in `slot`.
    #[must_use]
    pub fn selected(&self, slot: Slot) -> Option<&ScanRecord> {
        match slot {
            Slot::A => self.a.as_ref(),
            Slot::B => self.b.as_ref(),
        }
    }

    /// Differences between the two slots, once both are filled.
    ///
    /// An empty list means the scans are equivalent.
    #[must_use]
    pub fn differences(&self) -> Option<Vec<Difference>> {
        match (&self.a, &self.b) {
            (Some(a), Some(b)) => Some(views::compare(a, b)),
            _ => None,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<ScanRecord> {
        match slot {
            Slot::A => &mut self.a,
            Slot::B => &mut self.b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ScanDraft;
    use crate::storage::MemoryStore;

    #[test]
    fn test_differences_need_both_slots() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let url = store.add(ScanDraft::from_decoded("https://a.example")).unwrap();
        let text = store.add(ScanDraft::from_decoded("plain")).unwrap();

        let mut screen = CompareScreen::new(&backend);
        screen.mount().unwrap();
        assert_eq!(screen.candidates().len(), 2);
        assert!(screen.differences().is_none());

        assert!(screen.select(Slot::A, &url.id).is_none());
        assert!(screen.differences().is_none());

        assert!(screen.select(Slot::B, &text.id).is_none());
        assert_eq!(
            screen.differences().unwrap(),
            vec![Difference::KindDiffers, Difference::ContentDiffers]
        );

        screen.clear(Slot::A);
        assert!(screen.selected(Slot::A).is_none());
        assert!(screen.differences().is_none());
    }

    #[test]
    fn test_same_scan_in_both_slots() {
        let backend = MemoryStore::new();
        let store = ScanStore::new(&backend);
        let record = store.add(ScanDraft::from_decoded("hello")).unwrap();

        let mut screen = CompareScreen::new(&backend);
        screen.mount().unwrap();
        screen.select(Slot::A, &record.id);
        screen.select(Slot::B, &record.id);
        assert_eq!(screen.differences(), Some(Vec::new()));
    }

    #[test]
    fn test_select_unknown_id() {
        let backend = MemoryStore::new();
        let mut screen = CompareScreen::new(&backend);
        screen.mount().unwrap();

        let notice = screen.select(Slot::B, "missing").unwrap();
        assert!(notice.is_error());
        assert!(screen.selected(Slot::B).is_none());
    }
}
