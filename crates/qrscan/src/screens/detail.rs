//! A single scan.

use tracing::warn;

use crate::clipboard::ClipboardWriter;
use crate::error::{Error, Result};
use crate::record::{ScanPatch, ScanRecord};
use crate::records::ScanStore;
use crate::scanner::LinkOpener;
use crate::storage::KeyValueStore;

use super::{notify, Mounted, Notice, Redirect};

/// Detail view of one scan record.
#[derive(Debug)]
pub struct DetailScreen<'a, S: KeyValueStore> {
    store: ScanStore<'a, S>,
    record: Option<ScanRecord>,
}

impl<'a, S: KeyValueStore> DetailScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            store: ScanStore::new(backend),
            record: None,
        }
    }

    /// Load the record with `id`.
    ///
    /// An unknown id sends the user back to the history with a notice.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self, id: &str) -> Result<Mounted> {
        self.record = self.store.get(id)?;
        if self.record.is_some() {
            return Ok(Mounted::Ready);
        }

        warn!("Detail requested for unknown scan {}", id);
        Ok(Mounted::Redirect {
            to: Redirect::History,
            notice: Some(Notice::from_error(
                "Scan not found",
                &Error::not_found(id),
            )),
        })
    }

    /// The loaded record.
    #[must_use]
    pub fn record(&self) -> Option<&ScanRecord> {
        self.record.as_ref()
    }

    /// Flip the favorite flag.
    pub fn toggle_favorite(&mut self) -> Notice {
        let result = self.loaded().and_then(|record| {
            self.store
                .update(&record.id, ScanPatch::favorite(!record.favorite))
        });
        notify(self.replace(result), "Could not update favorite", |record| {
            if record.favorite {
                Notice::info("Added to favorites")
            } else {
                Notice::info("Removed from favorites")
            }
        })
    }

    /// Change the title.
    pub fn rename(&mut self, title: &str) -> Notice {
        let title = title.trim();
        if title.is_empty() {
            return Notice::error("Title cannot be empty");
        }
        let result = self
            .loaded()
            .and_then(|record| self.store.update(&record.id, ScanPatch::title(title)));
        notify(self.replace(result), "Could not rename scan", |record| {
            Notice::info("Renamed").with_message(record.title)
        })
    }

    /// Delete the record; on success the screen redirects to the history.
    pub fn delete(&mut self) -> (Notice, Option<Redirect>) {
        let result = self
            .loaded()
            .and_then(|record| self.store.delete(&record.id));
        match result {
            Ok(_) => {
                self.record = None;
                (
                    Notice::info("Deleted").with_message("The scan was removed from your history"),
                    Some(Redirect::History),
                )
            }
            Err(e) => (Notice::from_error("Could not delete scan", &e), None),
        }
    }

    /// Open the content in the system browser, for links only.
    pub fn open_link(&self, opener: &impl LinkOpener) -> Notice {
        let result = self.loaded().and_then(|record| {
            if record.is_link() {
                opener.open(&record.content).map(|()| true)
            } else {
                Ok(false)
            }
        });
        notify(result, "Could not open link", |opened| {
            if opened {
                Notice::info("Opened link")
            } else {
                Notice::error("Only links can be opened")
            }
        })
    }

    /// Copy the content to the clipboard. Sharing falls back to this too.
    pub fn copy_content(&self, clipboard: &impl ClipboardWriter) -> Notice {
        let result = self
            .loaded()
            .and_then(|record| clipboard.write_text(&record.content));
        notify(result, "Could not copy", |()| {
            Notice::info("Copied").with_message("The content was copied to the clipboard")
        })
    }

    fn loaded(&self) -> Result<ScanRecord> {
        self.record
            .clone()
            .ok_or_else(|| Error::not_found("current scan"))
    }

    fn replace(&mut self, result: Result<ScanRecord>) -> Result<ScanRecord> {
        if let Ok(record) = &result {
            self.record = Some(record.clone());
        }
        result
    }
}
