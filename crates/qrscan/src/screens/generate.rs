//! QR code generator.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;

use crate::codec::{EncodeOptions, Encoder, RasterImage};
use crate::error::Result;
use crate::payload::Payload;

use super::{notify, Notice};

/// Builds a payload, encodes it and keeps the last image for saving.
#[derive(Debug)]
pub struct GenerateScreen<E: Encoder> {
    encoder: E,
    options: EncodeOptions,
    generated: Option<(Payload, RasterImage)>,
}

impl<E: Encoder> GenerateScreen<E> {
    /// Create a generator with the given encoder and options.
    #[must_use]
    pub fn new(encoder: E, options: EncodeOptions) -> Self {
        Self {
            encoder,
            options,
            generated: None,
        }
    }

    /// Encode `payload`.
    ///
    /// Failures (including empty required fields) become an error notice and
    /// keep the previous image.
    pub fn generate(&mut self, payload: Payload) -> Notice {
        let content = payload.to_content();
        if content.is_empty() {
            return Notice::error("Could not generate QR code")
                .with_message("Fill in all required fields");
        }

        let result = self.encoder.encode(&content, &self.options);
        notify(result, "Could not generate QR code", |image| {
            info!("Generated {} QR code", payload.slug());
            self.generated = Some((payload, image));
            Notice::info("QR code generated")
        })
    }

    /// The last generated image.
    #[must_use]
    pub fn image(&self) -> Option<&RasterImage> {
        self.generated.as_ref().map(|(_, image)| image)
    }

    /// Suggested file name for the last image, `qrscan-<kind>-<millis>.png`.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.generated.as_ref().map(|(payload, _)| {
            format!(
                "qrscan-{}-{}.png",
                payload.slug(),
                Utc::now().timestamp_millis()
            )
        })
    }

    /// Write the last image as PNG.
    ///
    /// When `path` is a directory the suggested file name is used inside it.
    pub fn save(&self, path: &Path) -> (Notice, Option<PathBuf>) {
        let (Some(image), Some(name)) = (self.image(), self.file_name()) else {
            return (Notice::error("Nothing to save"), None);
        };

        let target = if path.is_dir() {
            path.join(name)
        } else {
            path.to_path_buf()
        };

        match image.save_png(&target) {
            Ok(()) => (
                Notice::info("Saved").with_message(target.display().to_string()),
                Some(target),
            ),
            Err(e) => (Notice::from_error("Could not save QR code", &e), None),
        }
    }

    /// Encode and return the image directly, for non-interactive callers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the payload is empty or too large.
    ///
    /// [`Error::Encoding`]: crate::error::Error::Encoding
    pub fn encode_now(&self, payload: &Payload) -> Result<RasterImage> {
        self.encoder.encode(&payload.to_content(), &self.options)
    }
}
