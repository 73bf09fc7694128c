//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::config::MAX_ENCODER_WIDTH;
use crate::payload::{Payload, WifiEncryption};
use crate::preferences::{Accent, Theme};

/// Scan command arguments.
#[derive(Debug, Args)]
pub struct ScanCommand {
    /// Image files to read, one frame each, in order
    #[arg(required = true, value_name = "IMAGE")]
    pub images: Vec<PathBuf>,

    /// Open the result in the default browser if it is a link
    #[arg(long)]
    pub open: bool,

    /// Try to switch on the flashlight before scanning
    #[arg(long)]
    pub torch: bool,
}

/// History listing arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show scans whose title or content contains this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// A single scan, by id.
#[derive(Debug, Args)]
pub struct IdCommand {
    /// Scan identifier
    pub id: String,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Scan identifier
    pub id: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Open the content in the default browser if it is a link
    #[arg(long)]
    pub open: bool,
}

/// Rename command arguments.
#[derive(Debug, Args)]
pub struct RenameCommand {
    /// Scan identifier
    pub id: String,

    /// New title
    pub title: String,
}

/// Clear command arguments.
#[derive(Debug, Args)]
pub struct ClearCommand {
    /// Skip confirmation
    #[arg(short, long)]
    pub yes: bool,
}

/// Compare command arguments.
#[derive(Debug, Args)]
pub struct CompareCommand {
    /// First scan identifier
    pub first: String,

    /// Second scan identifier
    pub second: String,
}

/// Status-style commands that only take an output switch.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Generate command arguments.
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Write a PNG here (a file or a directory) instead of printing to the terminal
    #[arg(short, long, global = true, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output width in pixels (defaults to the configured width)
    #[arg(
        short,
        long,
        global = true,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_ENCODER_WIDTH))
    )]
    pub width: Option<u32>,

    /// What to encode
    #[command(subcommand)]
    pub kind: GenerateKind,
}

/// Payload types the generator understands.
#[derive(Debug, Subcommand)]
pub enum GenerateKind {
    /// A link
    Url {
        /// The address
        url: String,
    },

    /// Free text
    Text {
        /// The text
        text: String,
    },

    /// Wi-Fi credentials
    Wifi {
        /// Network name
        #[arg(long)]
        ssid: String,

        /// Network key
        #[arg(long, default_value = "")]
        password: String,

        /// Authentication type
        #[arg(long, value_enum, default_value = "wpa")]
        encryption: EncryptionArg,
    },

    /// A vCard contact
    Contact {
        /// Full name
        #[arg(long)]
        name: String,

        /// Email address
        #[arg(long, default_value = "")]
        email: String,

        /// Phone number
        #[arg(long, default_value = "")]
        phone: String,

        /// Postal address
        #[arg(long, default_value = "")]
        address: String,
    },
}

impl From<GenerateKind> for Payload {
    fn from(kind: GenerateKind) -> Self {
        match kind {
            GenerateKind::Url { url } => Self::Url(url),
            GenerateKind::Text { text } => Self::Text(text),
            GenerateKind::Wifi {
                ssid,
                password,
                encryption,
            } => Self::Wifi {
                ssid,
                password,
                encryption: encryption.into(),
            },
            GenerateKind::Contact {
                name,
                email,
                phone,
                address,
            } => Self::Contact {
                name,
                email,
                phone,
                address,
            },
        }
    }
}

/// Sign-in arguments.
#[derive(Debug, Args)]
pub struct LoginCommand {
    /// Email address
    #[arg(required_unless_present = "google")]
    pub email: Option<String>,

    /// Password
    #[arg(required_unless_present = "google")]
    pub password: Option<String>,

    /// Sign in with Google instead
    #[arg(long, conflicts_with_all = ["email", "password"])]
    pub google: bool,
}

/// Sign-up arguments.
#[derive(Debug, Args)]
pub struct SignupCommand {
    /// Email address
    pub email: String,

    /// Password
    pub password: String,
}

/// Profile commands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Show the profile
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change profile fields; pass an empty value to clear one
    Set {
        /// Short handle
        #[arg(long)]
        username: Option<String>,

        /// Display name
        #[arg(long)]
        full_name: Option<String>,

        /// Avatar image location
        #[arg(long)]
        avatar_url: Option<String>,
    },
}

/// Preference commands.
#[derive(Debug, Subcommand)]
pub enum PrefsCommand {
    /// Show preferences
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Change preferences
    Set {
        /// Appearance
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,

        /// Accent colour
        #[arg(long, value_enum)]
        accent: Option<AccentArg>,

        /// Scanner viewfinder size (16-128)
        #[arg(long)]
        scanner_size: Option<u32>,

        /// Vibrate on a successful scan
        #[arg(long)]
        haptic_feedback: Option<bool>,

        /// Play a sound on a successful scan
        #[arg(long)]
        sound_effects: Option<bool>,
    },

    /// Switch between dark and light
    ToggleTheme,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Wi-Fi encryption argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncryptionArg {
    /// WPA/WPA2
    Wpa,
    /// WEP
    Wep,
    /// Open network
    None,
}

impl From<EncryptionArg> for WifiEncryption {
    fn from(arg: EncryptionArg) -> Self {
        match arg {
            EncryptionArg::Wpa => Self::Wpa,
            EncryptionArg::Wep => Self::Wep,
            EncryptionArg::None => Self::None,
        }
    }
}

/// Theme argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    /// Dark appearance
    Dark,
    /// Light appearance
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Self::Dark,
            ThemeArg::Light => Self::Light,
        }
    }
}

/// Accent colour argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AccentArg {
    /// Red to pink
    Red,
    /// Blue to cyan
    Blue,
    /// Green
    Green,
    /// Purple
    Purple,
    /// Orange
    Orange,
}

impl From<AccentArg> for Accent {
    fn from(arg: AccentArg) -> Self {
        match arg {
            AccentArg::Red => Self::Red,
            AccentArg::Blue => Self::Blue,
            AccentArg::Green => Self::Green,
            AccentArg::Purple => Self::Purple,
            AccentArg::Orange => Self::Orange,
        }
    }
}
