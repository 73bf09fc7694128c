//! Appearance preferences editor.

use crate::error::Result;
use crate::preferences::{Accent, PreferenceStore, Preferences, Theme};
use crate::storage::KeyValueStore;

use super::{notify, Notice};

/// Edits a draft of the preferences; nothing is stored until [`save`].
///
/// [`save`]: PreferencesScreen::save
#[derive(Debug)]
pub struct PreferencesScreen<'a, S: KeyValueStore> {
    store: PreferenceStore<'a, S>,
    draft: Preferences,
}

impl<'a, S: KeyValueStore> PreferencesScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            store: PreferenceStore::new(backend),
            draft: Preferences::default(),
        }
    }

    /// Load the stored preferences into the draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<()> {
        self.draft = self.store.load()?;
        Ok(())
    }

    /// The unsaved draft.
    #[must_use]
    pub fn draft(&self) -> &Preferences {
        &self.draft
    }

    /// Choose the appearance.
    pub fn set_theme(&mut self, theme: Theme) {
        self.draft.theme = theme;
    }

    /// Choose the accent colour.
    pub fn set_accent(&mut self, accent: Accent) {
        self.draft.accent = accent;
    }

    /// Choose the viewfinder size. Checked on save.
    pub fn set_scanner_size(&mut self, size: u32) {
        self.draft.scanner_size = size;
    }

    /// Flip haptic feedback.
    pub fn toggle_haptic_feedback(&mut self) {
        self.draft.haptic_feedback = !self.draft.haptic_feedback;
    }

    /// Flip sound effects.
    pub fn toggle_sound_effects(&mut self) {
        self.draft.sound_effects = !self.draft.sound_effects;
    }

    /// Validate and persist the draft.
    pub fn save(&self) -> Notice {
        notify(self.store.save(&self.draft), "Could not save preferences", |()| {
            Notice::info("Preferences saved")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_edit_and_save() {
        let backend = MemoryStore::new();
        let mut screen = PreferencesScreen::new(&backend);
        screen.mount().unwrap();

        screen.set_theme(Theme::Light);
        screen.set_accent(Accent::Green);
        screen.set_scanner_size(100);
        screen.toggle_sound_effects();
        assert!(!screen.save().is_error());

        let stored = PreferenceStore::new(&backend).load().unwrap();
        assert_eq!(stored.theme, Theme::Light);
        assert_eq!(stored.accent, Accent::Green);
        assert_eq!(stored.scanner_size, 100);
        assert!(!stored.sound_effects);
        assert!(stored.haptic_feedback);
    }

    #[test]
    fn test_draft_is_not_persisted_until_save() {
        let backend = MemoryStore::new();
        let mut screen = PreferencesScreen::new(&backend);
        screen.mount().unwrap();
        screen.toggle_haptic_feedback();

        assert!(PreferenceStore::new(&backend).load().unwrap().haptic_feedback);
        assert!(!screen.draft().haptic_feedback);
    }

    #[test]
    fn test_invalid_size_is_error_notice() {
        let backend = MemoryStore::new();
        let mut screen = PreferencesScreen::new(&backend);
        screen.mount().unwrap();
        screen.set_scanner_size(1000);

        let notice = screen.save();
        assert!(notice.is_error());
        assert!(backend.is_empty());
    }
}
