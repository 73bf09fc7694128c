//! The profile form.

use crate::error::Result;
use crate::profile::{ProfilePatch, ProfileStore, UserProfile};
use crate::session::{Session, UserDisplay};
use crate::storage::KeyValueStore;

use super::{guard, notify, Mounted, Notice, Redirect, Screen};

/// Editable profile fields. Blank fields are stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    /// Short handle.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Avatar image location.
    pub avatar_url: String,
}

impl ProfileForm {
    fn from_profile(profile: &UserProfile) -> Self {
        Self {
            username: profile.username.clone().unwrap_or_default(),
            full_name: profile.full_name.clone().unwrap_or_default(),
            avatar_url: profile.avatar_url.clone().unwrap_or_default(),
        }
    }

    fn to_patch(&self) -> ProfilePatch {
        let field = |value: &str| {
            let value = value.trim();
            Some((!value.is_empty()).then(|| value.to_string()))
        };
        ProfilePatch {
            username: field(&self.username),
            full_name: field(&self.full_name),
            avatar_url: field(&self.avatar_url),
        }
    }
}

/// Profile editing for the signed-in user.
#[derive(Debug)]
pub struct ProfileScreen<'a, S: KeyValueStore> {
    profiles: ProfileStore<'a, S>,
    session: Session<'a, S>,
    user: Option<UserDisplay>,
    /// The form being edited.
    pub form: ProfileForm,
}

impl<'a, S: KeyValueStore> ProfileScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            profiles: ProfileStore::new(backend),
            session: Session::new(backend),
            user: None,
            form: ProfileForm::default(),
        }
    }

    /// Load the form, or redirect to sign-in when signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn mount(&mut self) -> Result<Mounted> {
        let mounted = guard(&Screen::Profile, &self.session)?;
        if !mounted.is_ready() {
            return Ok(mounted);
        }

        self.form = self
            .profiles
            .get()?
            .map(|profile| ProfileForm::from_profile(&profile))
            .unwrap_or_default();
        self.user = self.session.current_user()?;
        Ok(Mounted::Ready)
    }

    /// Who is signed in.
    #[must_use]
    pub fn user(&self) -> Option<&UserDisplay> {
        self.user.as_ref()
    }

    /// Persist the form.
    pub fn save(&mut self) -> Notice {
        let result = self.profiles.update(self.form.to_patch()).and_then(|profile| {
            self.user = self.session.current_user()?;
            Ok(profile)
        });
        notify(result, "Could not update profile", |profile| {
            self.form = ProfileForm::from_profile(&profile);
            Notice::info("Profile updated").with_message("Your details were saved")
        })
    }

    /// Sign out and return to the home screen.
    pub fn sign_out(&mut self) -> (Notice, Option<Redirect>) {
        match self.session.sign_out() {
            Ok(()) => {
                self.user = None;
                (Notice::info("Signed out"), Some(Redirect::Home))
            }
            Err(e) => (Notice::from_error("Could not sign out", &e), None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_signed_out_redirects() {
        let backend = MemoryStore::new();
        let mut screen = ProfileScreen::new(&backend);
        assert_eq!(screen.mount().unwrap(), Mounted::redirect(Redirect::Login));
    }

    #[test]
    fn test_save_updates_display_name() {
        let backend = MemoryStore::new();
        Session::new(&backend).set_authenticated(true).unwrap();

        let mut screen = ProfileScreen::new(&backend);
        assert!(screen.mount().unwrap().is_ready());
        assert_eq!(screen.form, ProfileForm::default());
        assert_eq!(screen.user().unwrap().name, "User");

        screen.form.full_name = " Grace Hopper ".to_string();
        screen.form.username = "grace".to_string();
        assert!(!screen.save().is_error());
        assert_eq!(screen.user().unwrap().name, "Grace Hopper");
        assert_eq!(screen.form.full_name, "Grace Hopper");

        let stored = ProfileStore::new(&backend).get().unwrap().unwrap();
        assert_eq!(stored.username.as_deref(), Some("grace"));
        assert!(stored.avatar_url.is_none());
    }

    #[test]
    fn test_blank_field_clears() {
        let backend = MemoryStore::new();
        Session::new(&backend).set_authenticated(true).unwrap();
        ProfileStore::new(&backend)
            .update(ProfilePatch {
                username: Some(Some("old".to_string())),
                ..ProfilePatch::default()
            })
            .unwrap();

        let mut screen = ProfileScreen::new(&backend);
        screen.mount().unwrap();
        assert_eq!(screen.form.username, "old");

        screen.form.username.clear();
        screen.save();
        assert!(ProfileStore::new(&backend).get().unwrap().unwrap().username.is_none());
    }

    #[test]
    fn test_sign_out() {
        let backend = MemoryStore::new();
        Session::new(&backend).set_authenticated(true).unwrap();
        let mut screen = ProfileScreen::new(&backend);
        screen.mount().unwrap();

        let (_, redirect) = screen.sign_out();
        assert_eq!(redirect, Some(Redirect::Home));
        assert!(!Session::new(&backend).is_authenticated().unwrap());
        assert!(screen.user().is_none());
    }
}
