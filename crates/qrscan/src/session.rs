//! Simulated sign-in state.
//!
//! There is no credential check: any sign-in succeeds and only flips the
//! persisted `authenticated` flag. The "current user" is synthesized from the
//! profile.

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::profile::{ProfileStore, PROFILE_ID};
use crate::storage::schema::KEY_AUTHENTICATED;
use crate::storage::KeyValueStore;

/// Name shown when the profile has no full name.
pub const DEFAULT_DISPLAY_NAME: &str = "User";

/// Placeholder address for the local user.
pub const DEFAULT_EMAIL: &str = "user@example.com";

/// Who is signed in, for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserDisplay {
    /// Profile identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Avatar image location.
    pub image: Option<String>,
}

/// Typed access to the session flag held in a [`KeyValueStore`].
#[derive(Debug)]
pub struct Session<'a, S: KeyValueStore> {
    backend: &'a S,
}

impl<'a, S: KeyValueStore> Session<'a, S> {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self { backend }
    }

    /// Whether the session flag is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.backend.get(KEY_AUTHENTICATED)?.as_deref() == Some("true"))
    }

    /// Persist the session flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn set_authenticated(&self, value: bool) -> Result<()> {
        self.backend
            .set(KEY_AUTHENTICATED, if value { "true" } else { "false" })
    }

    /// The signed-in user, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn current_user(&self) -> Result<Option<UserDisplay>> {
        if !self.is_authenticated()? {
            return Ok(None);
        }

        let profile = ProfileStore::new(self.backend).get()?;
        let (name, image) = match profile {
            Some(profile) => (profile.full_name, profile.avatar_url),
            None => (None, None),
        };

        Ok(Some(UserDisplay {
            id: PROFILE_ID.to_string(),
            name: name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            email: DEFAULT_EMAIL.to_string(),
            image,
        }))
    }

    /// Sign in with any credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read or write fails.
    pub fn sign_in(&self, email: &str, _password: &str) -> Result<Option<UserDisplay>> {
        self.set_authenticated(true)?;
        info!("Signed in as {}", email);
        self.current_user()
    }

    /// Register with any credentials. Identical to [`Session::sign_in`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read or write fails.
    pub fn sign_up(&self, email: &str, password: &str) -> Result<Option<UserDisplay>> {
        self.sign_in(email, password)
    }

    /// Simulated Google sign-in.
    ///
    /// Returns a fixed Google display user rather than the profile-derived one.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn google_sign_in(&self) -> Result<UserDisplay> {
        self.set_authenticated(true)?;
        info!("Signed in with Google");
        Ok(UserDisplay {
            id: PROFILE_ID.to_string(),
            name: "Google User".to_string(),
            email: "user@gmail.com".to_string(),
            image: Some("https://lh3.googleusercontent.com/a/default-user".to_string()),
        })
    }

    /// Clear the session flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn sign_out(&self) -> Result<()> {
        self.set_authenticated(false)?;
        info!("Signed out");
        Ok(())
    }
}
