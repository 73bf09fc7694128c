//! Application settings.

use crate::error::Result;
use crate::preferences::{PreferenceStore, Preferences, Theme};
use crate::records::ScanStore;
use crate::storage::KeyValueStore;

use super::{notify, Notice};

/// History maintenance and the theme switch.
#[derive(Debug)]
pub struct SettingsScreen<'a, S: KeyValueStore> {
    scans: ScanStore<'a, S>,
    preferences: PreferenceStore<'a, S>,
    current: Preferences,
}

impl<'a, S: KeyValueStore> SettingsScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            scans: ScanStore::new(backend),
            preferences: PreferenceStore::new(backend),
            current: Preferences::default(),
        }
    }

    /// Load the stored preferences.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<()> {
        self.current = self.preferences.load()?;
        Ok(())
    }

    /// The active theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.current.theme
    }

    /// Switch between dark and light and persist the choice.
    pub fn toggle_theme(&mut self) -> Notice {
        let mut next = self.current.clone();
        next.theme = next.theme.toggled();
        let result = self.preferences.save(&next).map(|()| next);
        notify(result, "Could not change theme", |saved| {
            let theme = saved.theme;
            self.current = saved;
            Notice::info(format!("Theme set to {theme}"))
        })
    }

    /// Remove every scan.
    pub fn clear_history(&mut self) -> Notice {
        notify(self.scans.clear(), "Could not clear history", |()| {
            Notice::info("History cleared").with_message("Your scan history was cleared")
        })
    }
}
