//! Sign-in and sign-up.
//!
//! Authentication is simulated: any non-blank credentials are accepted.

use crate::error::Result;
use crate::session::{Session, UserDisplay};
use crate::storage::KeyValueStore;

use super::{Mounted, Notice, Redirect};

/// Whether the form signs in or registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    /// Existing account.
    #[default]
    SignIn,
    /// New account.
    SignUp,
}

/// The credentials form.
#[derive(Debug)]
pub struct LoginScreen<'a, S: KeyValueStore> {
    session: Session<'a, S>,
    /// Form mode.
    pub mode: LoginMode,
    /// Email field.
    pub email: String,
    /// Password field.
    pub password: String,
}

impl<'a, S: KeyValueStore> LoginScreen<'a, S> {
    /// Create an unmounted screen.
    #[must_use]
    pub fn new(backend: &'a S) -> Self {
        Self {
            session: Session::new(backend),
            mode: LoginMode::default(),
            email: String::new(),
            password: String::new(),
        }
    }

    /// Send signed-in users straight home.
    ///
    /// # Errors
    ///
    /// Returns an error if the session flag cannot be read.
    pub fn mount(&self) -> Result<Mounted> {
        if self.session.is_authenticated()? {
            return Ok(Mounted::redirect(Redirect::Home));
        }
        Ok(Mounted::Ready)
    }

    /// Switch between sign-in and sign-up.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            LoginMode::SignIn => LoginMode::SignUp,
            LoginMode::SignUp => LoginMode::SignIn,
        };
    }

    /// Submit the form.
    pub fn submit(&mut self) -> (Notice, Option<Redirect>) {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return (
                Notice::error("Missing credentials").with_message("Enter an email and a password"),
                None,
            );
        }

        let (result, title, message) = match self.mode {
            LoginMode::SignIn => (
                self.session.sign_in(self.email.trim(), &self.password),
                "Signed in",
                "You are now signed in",
            ),
            LoginMode::SignUp => (
                self.session.sign_up(self.email.trim(), &self.password),
                "Account created",
                "Your account was created",
            ),
        };

        match result {
            Ok(_) => {
                self.password.clear();
                (Notice::info(title).with_message(message), Some(Redirect::Home))
            }
            Err(e) => (Notice::from_error("Could not sign in", &e), None),
        }
    }

    /// Simulated Google sign-in.
    pub fn google_sign_in(&mut self) -> (Notice, Option<Redirect>) {
        match self.session.google_sign_in() {
            Ok(user) => (notice_for(&user), Some(Redirect::Home)),
            Err(e) => (Notice::from_error("Could not sign in with Google", &e), None),
        }
    }
}

fn notice_for(user: &UserDisplay) -> Notice {
    Notice::info("Signed in").with_message(format!("Welcome, {}", user.name))
}
