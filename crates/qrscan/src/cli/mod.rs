//! Command-line interface for qrscan.
//!
//! This module provides the CLI structure for the `qrscan` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AccentArg, ClearCommand, CompareCommand, ConfigCommand, EncryptionArg, GenerateCommand,
    GenerateKind, IdCommand, ListCommand, LoginCommand, PrefsCommand, ProfileCommand,
    RenameCommand, ScanCommand, ShowCommand, SignupCommand, StatusCommand, ThemeArg,
};

/// qrscan - Scan, generate and keep track of QR codes
///
/// Reads QR codes from image files, keeps a local history of everything
/// scanned, and generates codes for links, text, Wi-Fi networks and contacts.
#[derive(Debug, Parser)]
#[command(name = "qrscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decode QR codes from images and record the first one found
    Scan(ScanCommand),

    /// List scan history
    History(ListCommand),

    /// List favorite scans
    Favorites(ListCommand),

    /// Show one scan (requires sign-in)
    Show(ShowCommand),

    /// Add a scan to favorites, or remove it
    Favorite(IdCommand),

    /// Change the title of a scan (requires sign-in)
    Rename(RenameCommand),

    /// Copy the content of a scan to the clipboard (requires sign-in)
    Copy(IdCommand),

    /// Delete a scan
    Delete(IdCommand),

    /// Delete every scan
    Clear(ClearCommand),

    /// Compare two scans
    Compare(CompareCommand),

    /// Show usage statistics
    Stats(StatusCommand),

    /// Generate a QR code
    Generate(GenerateCommand),

    /// Sign in
    Login(LoginCommand),

    /// Create an account
    Signup(SignupCommand),

    /// Sign out
    Logout,

    /// Show who is signed in
    Whoami(StatusCommand),

    /// View or edit the profile (requires sign-in)
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// View or edit preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show storage status
    Status(StatusCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "qrscan");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["qrscan", "-q", "status"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["qrscan", "status"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["qrscan", "-v", "status"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["qrscan", "-vv", "status"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_scan() {
        let cli = parse(&["qrscan", "scan", "a.png", "b.jpg", "--open"]);
        let Command::Scan(cmd) = cli.command else {
            panic!("expected scan");
        };
        assert_eq!(cmd.images.len(), 2);
        assert!(cmd.open);
    }

    #[test]
    fn test_scan_requires_an_image() {
        assert!(Cli::try_parse_from(["qrscan", "scan"]).is_err());
    }

    #[test]
    fn test_parse_history_search() {
        let cli = parse(&["qrscan", "history", "--search", "rust", "--json"]);
        let Command::History(cmd) = cli.command else {
            panic!("expected history");
        };
        assert_eq!(cmd.search.as_deref(), Some("rust"));
        assert!(cmd.json);
    }

    #[test]
    fn test_parse_generate_wifi_with_output_after() {
        let cli = parse(&[
            "qrscan", "generate", "wifi", "--ssid", "Home", "--encryption", "none", "-o",
            "wifi.png",
        ]);
        let Command::Generate(cmd) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(cmd.output, Some(PathBuf::from("wifi.png")));
        assert!(matches!(
            cmd.kind,
            GenerateKind::Wifi {
                encryption: EncryptionArg::None,
                ..
            }
        ));
    }

    #[test]
    fn test_generate_width_is_bounded() {
        let cli = parse(&["qrscan", "generate", "-w", "4096", "text", "hi"]);
        assert!(matches!(
            cli.command,
            Command::Generate(GenerateCommand { width: Some(4096), .. })
        ));
        assert!(Cli::try_parse_from(["qrscan", "generate", "-w", "4097", "text", "hi"]).is_err());
        assert!(Cli::try_parse_from(["qrscan", "generate", "-w", "0", "text", "hi"]).is_err());
    }

    #[test]
    fn test_parse_copy() {
        let cli = parse(&["qrscan", "copy", "abc"]);
        assert!(matches!(cli.command, Command::Copy(IdCommand { ref id }) if id == "abc"));
        assert!(Cli::try_parse_from(["qrscan", "copy"]).is_err());
    }

    #[test]
    fn test_parse_login() {
        let cli = parse(&["qrscan", "login", "a@b.c", "pw"]);
        assert!(matches!(cli.command, Command::Login(LoginCommand { google: false, .. })));

        let cli = parse(&["qrscan", "login", "--google"]);
        assert!(matches!(cli.command, Command::Login(LoginCommand { google: true, .. })));

        assert!(Cli::try_parse_from(["qrscan", "login"]).is_err());
    }

    #[test]
    fn test_parse_prefs_set() {
        let cli = parse(&[
            "qrscan",
            "prefs",
            "set",
            "--theme",
            "light",
            "--scanner-size",
            "96",
        ]);
        assert!(matches!(
            cli.command,
            Command::Prefs(PrefsCommand::Set {
                theme: Some(ThemeArg::Light),
                scanner_size: Some(96),
                ..
            })
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["qrscan", "-c", "/custom/config.toml", "status"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
