//! Camera capture abstraction.
//!
//! The scan workflow pulls frames from a [`CaptureDevice`]. The device that
//! ships with the CLI, [`ImageFileDevice`], reads still images from disk, one
//! frame per file, and has no flashlight.

use std::collections::VecDeque;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::codec::Frame;
use crate::error::{Error, Result};

/// A source of camera frames.
pub trait CaptureDevice {
    /// The name of this device (for logging).
    fn name(&self) -> &'static str;

    /// Acquire the next frame. `None` means the device has no more frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureUnavailable`] if the camera cannot be read.
    fn next_frame(&mut self) -> Result<Option<Frame>>;

    /// Switch the flashlight on or off.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CaptureUnavailable`] if the device has no flashlight.
    fn set_torch(&mut self, on: bool) -> Result<()>;
}

/// Reads frames from image files in order.
#[derive(Debug, Clone, Default)]
pub struct ImageFileDevice {
    pending: VecDeque<PathBuf>,
}

impl ImageFileDevice {
    /// Create a device that will yield each file once, in order.
    #[must_use]
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            pending: paths.into_iter().collect(),
        }
    }

    /// Number of files not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl CaptureDevice for ImageFileDevice {
    fn name(&self) -> &'static str {
        "image-file"
    }

    fn next_frame(&mut self) -> Result<Option<Frame>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };

        debug!("Reading frame from {}", path.display());
        let image = image::open(&path).map_err(|e| {
            warn!("Cannot read frame {}: {}", path.display(), e);
            Error::capture_unavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(Some(Frame::from(image.to_rgba8())))
    }

    fn set_torch(&mut self, _on: bool) -> Result<()> {
        Err(Error::capture_unavailable(
            "image files have no flashlight",
        ))
    }
}
