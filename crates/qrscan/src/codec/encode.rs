//! Image encoding via `qrcode`.

use image::RgbaImage;
use qrcode::render::unicode;
use qrcode::{Color, QrCode};
use tracing::debug;

use super::{EncodeOptions, Encoder, RasterImage};
use crate::error::{Error, Result};

/// Encoder producing square, nearest-neighbour scaled symbols.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrEncoder;

impl QrEncoder {
    /// Create an encoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Render `text` as block characters for a terminal.
    ///
    /// Two module rows share one line using half blocks, with a quiet zone.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] under the same conditions as [`Encoder::encode`].
    pub fn render_terminal(&self, text: &str) -> Result<String> {
        Ok(build(text)?
            .render::<unicode::Dense1x2>()
            .quiet_zone(true)
            .build())
    }
}

impl Encoder for QrEncoder {
    fn encode(&self, text: &str, options: &EncodeOptions) -> Result<RasterImage> {
        let code = build(text)?;
        let modules = code.width();
        let margin = options.margin as usize;
        let total = modules + 2 * margin;
        let side = (options.width as usize).max(total);

        let on_symbol = |m: usize| m >= margin && m < margin + modules;
        let side = u32::try_from(side).map_err(|_| Error::encoding("image too large"))?;
        let scale = |p: u32| p as usize * total / side as usize;
        let image = RgbaImage::from_fn(side, side, |px, py| {
            let (mx, my) = (scale(px), scale(py));
            let is_dark = on_symbol(mx)
                && on_symbol(my)
                && code[(mx - margin, my - margin)] == Color::Dark;
            let colour = if is_dark { options.dark } else { options.light };
            colour.into()
        });

        debug!(
            "Encoded {} bytes as {}x{} modules into {}px image",
            text.len(),
            modules,
            modules,
            side
        );
        Ok(RasterImage::from(image))
    }
}

fn build(text: &str) -> Result<QrCode> {
    if text.is_empty() {
        return Err(Error::encoding("nothing to encode"));
    }
    QrCode::new(text.as_bytes()).map_err(|e| Error::encoding(e.to_string()))
}
