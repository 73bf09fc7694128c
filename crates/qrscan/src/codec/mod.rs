//! QR symbol decoding and encoding.
//!
//! The scan workflow and the generator only see the [`Decoder`] and
//! [`Encoder`] traits. [`QrDecoder`] and [`QrEncoder`] are the implementations
//! backed by `rqrr` and `qrcode`.

mod decode;
mod encode;

use std::path::Path;

use image::{imageops, GrayImage, ImageFormat, Pixel, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use decode::QrDecoder;
pub use encode::QrEncoder;

/// Finds and reads a QR symbol in a camera frame.
pub trait Decoder {
    /// Decoded text of the first readable symbol, if any.
    fn decode(&self, frame: &Frame) -> Option<String>;
}

/// Renders text as a QR symbol image.
pub trait Encoder {
    /// Encode `text` with the given options.
    ///
    /// Identical inputs always produce identical images.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if `text` is empty or does not fit in a symbol.
    fn encode(&self, text: &str, options: &EncodeOptions) -> Result<RasterImage>;
}

/// One RGBA8 camera frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(RgbaImage);

impl Frame {
    /// Wrap a raw RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is too short for the dimensions.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let len = rgba.len();
        RgbaImage::from_raw(width, height, rgba)
            .map(Self)
            .ok_or_else(|| {
                Error::internal(format!(
                    "frame buffer of {len} bytes does not fit {width}x{height}"
                ))
            })
    }

    /// Frame width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Frame height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Perceived brightness of the pixel at `(x, y)`.
    #[must_use]
    pub fn luma(&self, x: u32, y: u32) -> u8 {
        self.0.get_pixel(x, y).to_luma().0[0]
    }

    /// Greyscale copy, as the decoder consumes it.
    #[must_use]
    pub fn to_luma8(&self) -> GrayImage {
        imageops::grayscale(&self.0)
    }
}

impl From<RgbaImage> for Frame {
    fn from(image: RgbaImage) -> Self {
        Self(image)
    }
}

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Black.
    pub const BLACK: Self = Self(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self(0xff, 0xff, 0xff);

    /// Parse `#rrggbb`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigValidation`] for anything else.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || Error::ConfigValidation {
            message: format!("invalid colour {s:?}, expected #rrggbb"),
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// `#rrggbb` form.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Options for [`Encoder::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Output width (and height) in pixels.
    pub width: u32,
    /// Quiet zone in modules.
    pub margin: u32,
    /// Colour of dark modules.
    pub dark: Rgb,
    /// Colour of light modules and the quiet zone.
    pub light: Rgb,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            width: 320,
            margin: 2,
            dark: Rgb::BLACK,
            light: Rgb::WHITE,
        }
    }
}

/// An encoded QR image, RGBA8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage(RgbaImage);

impl RasterImage {
    /// Image width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Image height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Colour of the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let Rgba([r, g, b, _]) = *self.0.get_pixel(x, y);
        Rgb(r, g, b)
    }

    /// Write the image as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.0.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }

    /// Treat the image as a camera frame.
    #[must_use]
    pub fn to_frame(&self) -> Frame {
        Frame(self.0.clone())
    }
}

impl From<RgbaImage> for RasterImage {
    fn from(image: RgbaImage) -> Self {
        Self(image)
    }
}

impl From<Rgb> for Rgba<u8> {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Rgba([r, g, b, 0xff])
    }
}
