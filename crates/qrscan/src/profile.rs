//! The single user profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::storage::schema::KEY_PROFILE;
use crate::storage::KeyValueStore;

/// Identifier of the one profile kept per device.
pub const PROFILE_ID: &str = "user-1";

/// The local user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Fixed singleton identifier.
    pub id: String,
    /// Short handle.
    pub username: Option<String>,
    /// Display name.
    pub full_name: Option<String>,
    /// Avatar image location.
    pub avatar_url: Option<String>,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: PROFILE_ID.to_string(),
            username: None,
            full_name: None,
            avatar_url: None,
        }
    }
}

/// A partial profile update. `Some(None)` clears a field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    /// New username.
    pub username: Option<Option<String>>,
    /// New display name.
    pub full_name: Option<Option<String>>,
    /// New avatar location.
    pub avatar_url: Option<Option<String>>,
}

impl ProfilePatch {
    fn apply_to(self, profile: &mut UserProfile) {
        if let Some(username) = self.username {
            profile.username = username;
        }
        if let Some(full_name) = self.full_name {
            profile.full_name = full_name;
        }
        if let Some(avatar_url) = self.avatar_url {
            profile.avatar_url = avatar_url;
        }
    }
}

/// Typed access to the profile held in a [`KeyValueStore`].
#[derive(Debug)]
pub struct ProfileStore<'a, S: KeyValueStore> {
    backend: &'a S,
}

impl<'a, S: KeyValueStore> ProfileStore<'a, S> {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self { backend }
    }

    /// The stored profile, if one has ever been saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn get(&self) -> Result<Option<UserProfile>> {
        self.backend.get_json(KEY_PROFILE)
    }

    /// Merge `patch` into the stored profile, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read or write fails.
    pub fn update(&self, patch: ProfilePatch) -> Result<UserProfile> {
        let mut profile = self.get()?.unwrap_or_default();
        patch.apply_to(&mut profile);
        self.backend.set_json(KEY_PROFILE, &profile)?;
        debug!("Saved profile {}", profile.id);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_get_absent() {
        let backend = MemoryStore::new();
        assert!(ProfileStore::new(&backend).get().unwrap().is_none());
    }

    #[test]
    fn test_update_creates_singleton() {
        let backend = MemoryStore::new();
        let store = ProfileStore::new(&backend);

        let profile = store
            .update(ProfilePatch {
                full_name: Some(Some("Ada Lovelace".to_string())),
                ..ProfilePatch::default()
            })
            .unwrap();

        assert_eq!(profile.id, PROFILE_ID);
        assert_eq!(profile.full_name.as_deref(), Some("Ada Lovelace"));
        assert!(profile.username.is_none());
        assert_eq!(store.get().unwrap(), Some(profile));
    }

    #[test]
    fn test_update_merges_and_clears() {
        let backend = MemoryStore::new();
        let store = ProfileStore::new(&backend);
        store
            .update(ProfilePatch {
                username: Some(Some("ada".to_string())),
                full_name: Some(Some("Ada".to_string())),
                ..ProfilePatch::default()
            })
            .unwrap();

        let profile = store
            .update(ProfilePatch {
                full_name: Some(None),
                ..ProfilePatch::default()
            })
            .unwrap();

        assert_eq!(profile.username.as_deref(), Some("ada"));
        assert!(profile.full_name.is_none());
    }

    #[test]
    fn test_empty_patch_still_persists_default() {
        let backend = MemoryStore::new();
        let store = ProfileStore::new(&backend);

        let profile = store.update(ProfilePatch::default()).unwrap();
        assert_eq!(profile, UserProfile::default());
        assert!(store.get().unwrap().is_some());
    }
}
