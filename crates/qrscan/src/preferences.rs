//! Persisted display preferences.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::storage::schema::KEY_PREFERENCES;
use crate::storage::KeyValueStore;

/// Smallest accepted scanner frame size.
pub const MIN_SCANNER_SIZE: u32 = 16;

/// Largest accepted scanner frame size.
pub const MAX_SCANNER_SIZE: u32 = 128;

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark appearance.
    #[default]
    Dark,
    /// Light appearance.
    Light,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => write!(f, "dark"),
            Self::Light => write!(f, "light"),
        }
    }
}

/// Accent colour used by the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    /// `#FF3D00` to `#FF267E`.
    #[default]
    Red,
    /// `#0070F3` to `#00C8FF`.
    Blue,
    /// `#10B981` to `#34D399`.
    Green,
    /// `#8B5CF6` to `#C084FC`.
    Purple,
    /// `#F97316` to `#FDBA74`.
    Orange,
}

impl Accent {
    /// Gradient endpoints as hex strings.
    #[must_use]
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            Self::Red => ("#FF3D00", "#FF267E"),
            Self::Blue => ("#0070F3", "#00C8FF"),
            Self::Green => ("#10B981", "#34D399"),
            Self::Purple => ("#8B5CF6", "#C084FC"),
            Self::Orange => ("#F97316", "#FDBA74"),
        }
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Orange => "orange",
        };
        f.write_str(name)
    }
}

/// Interface preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Light or dark appearance.
    pub theme: Theme,
    /// Accent colour.
    pub accent: Accent,
    /// Scanner viewfinder size.
    pub scanner_size: u32,
    /// Vibrate on a successful scan.
    pub haptic_feedback: bool,
    /// Play a sound on a successful scan.
    pub sound_effects: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            accent: Accent::Red,
            scanner_size: 64,
            haptic_feedback: true,
            sound_effects: true,
        }
    }
}

impl Preferences {
    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] if `scanner_size` is out of range.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_SCANNER_SIZE..=MAX_SCANNER_SIZE).contains(&self.scanner_size) {
            return Err(Error::ConfigValidation {
                message: format!(
                    "scanner_size must be between {MIN_SCANNER_SIZE} and {MAX_SCANNER_SIZE}, got {}",
                    self.scanner_size
                ),
            });
        }
        Ok(())
    }
}

/// Typed access to preferences held in a [`KeyValueStore`].
#[derive(Debug)]
pub struct PreferenceStore<'a, S: KeyValueStore> {
    backend: &'a S,
}

impl<'a, S: KeyValueStore> PreferenceStore<'a, S> {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self { backend }
    }

    /// Stored preferences, or defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn load(&self) -> Result<Preferences> {
        Ok(self.backend.get_json(KEY_PREFERENCES)?.unwrap_or_default())
    }

    /// Validate and persist `preferences`.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the backend write fails.
    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        preferences.validate()?;
        self.backend.set_json(KEY_PREFERENCES, preferences)?;
        debug!("Saved preferences");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults_when_absent() {
        let backend = MemoryStore::new();
        let prefs = PreferenceStore::new(&backend).load().unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.theme, Theme::Dark);
    }

    #[test]
    fn test_save_and_load() {
        let backend = MemoryStore::new();
        let store = PreferenceStore::new(&backend);
        let prefs = Preferences {
            theme: Theme::Light,
            accent: Accent::Purple,
            scanner_size: 96,
            haptic_feedback: false,
            sound_effects: true,
        };

        store.save(&prefs).unwrap();
        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn test_save_rejects_out_of_range_size() {
        let backend = MemoryStore::new();
        let store = PreferenceStore::new(&backend);
        let prefs = Preferences {
            scanner_size: 4,
            ..Preferences::default()
        };

        assert!(store.save(&prefs).is_err());
        assert!(backend.is_empty());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let backend = MemoryStore::new();
        backend.set(KEY_PREFERENCES, r#"{"theme":"light"}"#).unwrap();

        let prefs = PreferenceStore::new(&backend).load().unwrap();
        assert_eq!(prefs.theme, Theme::Light);
        assert_eq!(prefs.scanner_size, 64);
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_accent_gradient() {
        assert_eq!(Accent::Red.gradient().0, "#FF3D00");
        assert_eq!(Accent::Blue.to_string(), "blue");
    }
}
