//! Configuration management for qrscan.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use chrono::Duration;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::codec::{EncodeOptions, Rgb};
use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "qrscan";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "qrscan.db";

/// Largest encoder output width, in pixels.
pub const MAX_ENCODER_WIDTH: u32 = 4096;

/// Longest statistics window, in days.
pub const MAX_STATS_DAYS: u32 = 3650;

/// Pattern accepted for colour settings.
const HEX_COLOR_PATTERN: &str = r"^#[0-9a-fA-F]{6}$";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `QRSCAN_`)
/// 2. TOML config file at `~/.config/qrscan/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// QR generation defaults.
    pub encoder: EncoderConfig,
    /// Statistics windows.
    pub stats: StatsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/qrscan/qrscan.db`
    pub database_path: Option<PathBuf>,
}

/// Defaults applied when generating QR images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// Output image width in pixels.
    pub width: u32,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    /// Colour of dark modules (`#rrggbb`).
    pub dark_color: String,
    /// Colour of light modules (`#rrggbb`).
    pub light_color: String,
}

/// Windows used by the statistics screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Look-back window for counting active days.
    pub recent_window_days: u32,
    /// Number of days in the per-day activity chart.
    pub chart_days: u32,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            width: 320,
            margin: 2,
            dark_color: "#000000".to_string(),
            light_color: "#ffffff".to_string(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 30,
            chart_days: 7,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed("QRSCAN_").split("_"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.encoder.width == 0 || self.encoder.width > MAX_ENCODER_WIDTH {
            return Err(Error::ConfigValidation {
                message: format!(
                    "encoder width must be between 1 and {MAX_ENCODER_WIDTH}, got {}",
                    self.encoder.width
                ),
            });
        }

        let hex = Regex::new(HEX_COLOR_PATTERN)
            .map_err(|e| Error::internal(format!("bad colour pattern: {e}")))?;
        for (name, value) in [
            ("dark_color", &self.encoder.dark_color),
            ("light_color", &self.encoder.light_color),
        ] {
            if !hex.is_match(value) {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must look like #rrggbb, got {value}"),
                });
            }
        }

        for (name, days) in [
            ("recent_window_days", self.stats.recent_window_days),
            ("chart_days", self.stats.chart_days),
        ] {
            if days == 0 || days > MAX_STATS_DAYS {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be between 1 and {MAX_STATS_DAYS}, got {days}"),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Build encoder options from the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a colour does not parse.
    pub fn encode_options(&self) -> Result<EncodeOptions> {
        Ok(EncodeOptions {
            width: self.encoder.width,
            margin: self.encoder.margin,
            dark: Rgb::from_hex(&self.encoder.dark_color)?,
            light: Rgb::from_hex(&self.encoder.light_color)?,
        })
    }

    /// Get the active-days window as a Duration.
    #[must_use]
    pub fn recent_window(&self) -> Duration {
        Duration::days(i64::from(self.stats.recent_window_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert_eq!(config.encoder.width, 320);
        assert_eq!(config.encoder.margin, 2);
        assert_eq!(config.stats.recent_window_days, 30);
        assert_eq!(config.stats.chart_days, 7);
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_width() {
        let mut config = Config::default();
        config.encoder.width = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("width"));
    }

    #[test]
    fn test_validate_bad_colour() {
        let mut config = Config::default();
        config.encoder.dark_color = "black".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("dark_color"));
    }

    #[test]
    fn test_validate_zero_window() {
        let mut config = Config::default();
        config.stats.chart_days = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_width_upper_bound() {
        let mut config = Config::default();
        config.encoder.width = MAX_ENCODER_WIDTH;
        assert!(config.validate().is_ok());

        config.encoder.width = u32::MAX;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("width"));
    }

    #[test]
    fn test_validate_stats_upper_bound() {
        let mut config = Config::default();
        config.stats.chart_days = 100_000_000;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("chart_days"));

        let mut config = Config::default();
        config.stats.recent_window_days = MAX_STATS_DAYS + 1;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("recent_window_days"));
    }

    #[test]
    fn test_database_path_default() {
        let path = Config::default().database_path();
        assert!(path.to_string_lossy().contains("qrscan.db"));
    }

    #[test]
    fn test_database_path_custom() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/custom/path/db.sqlite"));

        assert_eq!(
            config.database_path(),
            PathBuf::from("/custom/path/db.sqlite")
        );
    }

    #[test]
    fn test_encode_options_from_defaults() {
        let options = Config::default().encode_options().unwrap();
        assert_eq!(options, EncodeOptions::default());
    }

    #[test]
    fn test_recent_window() {
        assert_eq!(Config::default().recent_window(), Duration::days(30));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("qrscan"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[encoder]\nwidth = 512\ndark_color = \"#112233\"\n").unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.encoder.width, 512);
        assert_eq!(config.encoder.dark_color, "#112233");
        assert_eq!(config.encoder.margin, 2);
    }

    #[test]
    fn test_encoder_config_deserialize() {
        let json = r#"{"width": 128}"#;
        let encoder: EncoderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(encoder.width, 128);
        assert_eq!(encoder.light_color, "#ffffff");
    }
}
