//! Copying scan content to the system clipboard.

use clipboard_rs::{Clipboard, ClipboardContext};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Places text on a clipboard.
pub trait ClipboardWriter {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClipboardUnavailable`] if the clipboard cannot be reached.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The operating system clipboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let ctx = ClipboardContext::new().map_err(|e| {
            warn!("Cannot open clipboard: {}", e);
            Error::clipboard_unavailable(e.to_string())
        })?;
        ctx.set_text(text.to_string())
            .map_err(|e| Error::clipboard_unavailable(e.to_string()))?;
        debug!("Copied {} bytes to the clipboard", text.len());
        Ok(())
    }
}
