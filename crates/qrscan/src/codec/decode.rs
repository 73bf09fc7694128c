//! Frame decoding via `rqrr`.

use rqrr::PreparedImage;
use tracing::{debug, trace};

use super::{Decoder, Frame};

/// Decoder that looks for QR symbols in a greyscale copy of the frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrDecoder;

impl QrDecoder {
    /// Create a decoder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for QrDecoder {
    fn decode(&self, frame: &Frame) -> Option<String> {
        let mut prepared = PreparedImage::prepare(frame.to_luma8());

        let grids = prepared.detect_grids();
        trace!("Found {} candidate grids", grids.len());

        grids.iter().find_map(|grid| match grid.decode() {
            Ok((_meta, content)) => Some(content),
            Err(e) => {
                debug!("Skipping unreadable grid: {}", e);
                None
            }
        })
    }
}
