//! Screen controllers.
//!
//! Each controller owns the state one screen displays and exposes the actions
//! that screen offers. Controllers borrow a [`KeyValueStore`] and re-read from
//! it after every mutation, so what they hold is always a fresh snapshot.
//!
//! Actions never fail outright. Domain and storage errors are turned into
//! [`Notice`]s at this boundary; navigation is expressed as a [`Redirect`].

pub mod compare;
pub mod detail;
pub mod favorites;
pub mod generate;
pub mod history;
pub mod login;
pub mod preferences;
pub mod profile;
pub mod scanner;
pub mod settings;
pub mod statistics;

use std::fmt;

use tracing::warn;

use crate::error::{Error, Result};
use crate::session::Session;
use crate::storage::KeyValueStore;

pub use compare::{CompareScreen, Slot};
pub use detail::DetailScreen;
pub use favorites::FavoritesScreen;
pub use generate::GenerateScreen;
pub use history::HistoryScreen;
pub use login::{LoginMode, LoginScreen};
pub use preferences::PreferencesScreen;
pub use profile::{ProfileForm, ProfileScreen};
pub use scanner::{ScannerScreen, MAX_UNAVAILABLE_FRAMES};
pub use settings::SettingsScreen;
pub use statistics::StatisticsScreen;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Confirmation of a completed action.
    Info,
    /// Something went wrong; the screen stays usable.
    Error,
}

/// A short message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Headline.
    pub title: String,
    /// Optional detail line.
    pub message: Option<String>,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: None,
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(title: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: None,
        }
    }

    /// Attach a detail line.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Error notice for a failed action.
    pub(crate) fn from_error(title: &str, error: &Error) -> Self {
        warn!("{}: {}", title, error);
        Self::error(title).with_message(error.to_string())
    }

    /// Whether this is an error notice.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.title, message),
            None => f.write_str(&self.title),
        }
    }
}

/// Turn an action result into a notice.
pub(crate) fn notify<T>(
    result: Result<T>,
    failure: &str,
    success: impl FnOnce(T) -> Notice,
) -> Notice {
    match result {
        Ok(value) => success(value),
        Err(e) => Notice::from_error(failure, &e),
    }
}

/// Navigation requested by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The scanner, which is the home screen.
    Home,
    /// The sign-in screen.
    Login,
    /// The scan history.
    History,
}

/// Outcome of mounting a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mounted {
    /// The screen is ready to display.
    Ready,
    /// The screen cannot be shown; go elsewhere.
    Redirect {
        /// Where to go.
        to: Redirect,
        /// What to tell the user, if anything.
        notice: Option<Notice>,
    },
}

impl Mounted {
    /// Redirect without a notice.
    #[must_use]
    pub fn redirect(to: Redirect) -> Self {
        Self::Redirect { to, notice: None }
    }

    /// Whether the screen is ready.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Every screen of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Live scanning (home).
    Scanner,
    /// Scan history.
    History,
    /// Favorite scans.
    Favorites,
    /// One scan, by id.
    Detail(String),
    /// Side-by-side comparison.
    Compare,
    /// Usage statistics.
    Statistics,
    /// Application settings.
    Settings,
    /// Appearance preferences.
    Preferences,
    /// The user profile.
    Profile,
    /// Sign-in and sign-up.
    Login,
    /// QR code generator.
    Generate,
}

impl Screen {
    /// Whether the screen is only available when signed in.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Profile | Self::Detail(_))
    }
}

/// Check whether `screen` may be shown in the current session.
///
/// # Errors
///
/// Returns an error if the session flag cannot be read.
pub fn guard<S: KeyValueStore>(screen: &Screen, session: &Session<'_, S>) -> Result<Mounted> {
    if screen.requires_auth() && !session.is_authenticated()? {
        return Ok(Mounted::redirect(Redirect::Login));
    }
    Ok(Mounted::Ready)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_requires_auth() {
        assert!(Screen::Profile.requires_auth());
        assert!(Screen::Detail("1".to_string()).requires_auth());
        assert!(!Screen::Scanner.requires_auth());
        assert!(!Screen::History.requires_auth());
        assert!(!Screen::Login.requires_auth());
    }

    #[test]
    fn test_guard_redirects_to_login() {
        let backend = MemoryStore::new();
        let session = Session::new(&backend);

        assert_eq!(
            guard(&Screen::Profile, &session).unwrap(),
            Mounted::redirect(Redirect::Login)
        );
        assert!(guard(&Screen::History, &session).unwrap().is_ready());

        session.set_authenticated(true).unwrap();
        assert!(guard(&Screen::Profile, &session).unwrap().is_ready());
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(Notice::info("Saved").to_string(), "Saved");
        let notice = Notice::error("Failed").with_message("disk full");
        assert!(notice.is_error());
        assert_eq!(notice.to_string(), "Failed: disk full");
    }

    #[test]
    fn test_notify() {
        let ok = notify(Ok(3), "Failed", |n| Notice::info(format!("Got {n}")));
        assert_eq!(ok, Notice::info("Got 3"));

        let err = notify::<()>(Err(Error::not_found("x")), "Failed", |()| {
            Notice::info("unreachable")
        });
        assert!(err.is_error());
        assert_eq!(err.message.as_deref(), Some("scan not found: x"));
    }
}
