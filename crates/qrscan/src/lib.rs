//! `qrscan` - A local QR code scanner, generator and scan history
//!
//! This library provides the scan history store, the scan workflow, QR
//! decoding and encoding, and the screen controllers driven by the `qrscan`
//! binary. All state lives in a local key-value store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod capture;
pub mod cli;
pub mod clipboard;
pub mod codec;
pub mod config;
pub mod error;
pub mod logging;
pub mod payload;
pub mod preferences;
pub mod profile;
pub mod record;
pub mod records;
pub mod scanner;
pub mod screens;
pub mod session;
pub mod stats;
pub mod storage;
pub mod views;

pub use capture::{CaptureDevice, ImageFileDevice};
pub use clipboard::{ClipboardWriter, SystemClipboard};
pub use codec::{Decoder, EncodeOptions, Encoder, Frame, QrDecoder, QrEncoder, RasterImage, Rgb};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use payload::{Payload, WifiEncryption};
pub use preferences::{Accent, PreferenceStore, Preferences, Theme};
pub use profile::{ProfilePatch, ProfileStore, UserProfile};
pub use record::{ScanDraft, ScanKind, ScanPatch, ScanRecord};
pub use records::ScanStore;
pub use scanner::{LinkOpener, ScanSession, ScanState, SystemOpener};
pub use session::{Session, UserDisplay};
pub use stats::Statistics;
pub use storage::{KeyValueStore, MemoryStore, Storage, StorageStats};
