//! Error types for qrscan.
//!
//! This module defines all error types used throughout the qrscan crate.
//! Domain errors (`NotFound`, `Encoding`, `CaptureUnavailable`,
//! `ClipboardUnavailable`) are always recoverable and are surfaced to the user
//! as notices; the remaining variants describe failures of the local storage
//! and configuration layers.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for qrscan operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Domain Errors ===
    /// No scan record exists with the given identifier.
    #[error("scan not found: {id}")]
    NotFound {
        /// The identifier that was looked up.
        id: String,
    },

    /// The QR encoder rejected its input.
    #[error("failed to encode QR code: {message}")]
    Encoding {
        /// Description of what went wrong.
        message: String,
    },

    /// The camera or flashlight capability is absent.
    #[error("capture unavailable: {message}")]
    CaptureUnavailable {
        /// Description of the missing capability.
        message: String,
    },

    /// The system clipboard cannot be written.
    #[error("clipboard unavailable: {message}")]
    ClipboardUnavailable {
        /// Description of the failure.
        message: String,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading or writing an image file failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for qrscan operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given scan id.
    #[must_use]
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create a new encoding error.
    #[must_use]
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a new capture-unavailable error.
    #[must_use]
    pub fn capture_unavailable(message: impl Into<String>) -> Self {
        Self::CaptureUnavailable {
            message: message.into(),
        }
    }

    /// Create a new clipboard-unavailable error.
    #[must_use]
    pub fn clipboard_unavailable(message: impl Into<String>) -> Self {
        Self::ClipboardUnavailable {
            message: message.into(),
        }
    }

    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this error indicates a missing scan record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error can be shown to the user and the action retried.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. }
                | Self::Encoding { .. }
                | Self::CaptureUnavailable { .. }
                | Self::ClipboardUnavailable { .. }
        )
    }
}
