//! The home screen: live scanning.

use tracing::{debug, warn};

use crate::capture::CaptureDevice;
use crate::codec::Decoder;
use crate::error::Error;
use crate::record::ScanRecord;
use crate::records::ScanStore;
use crate::scanner::{LinkOpener, ScanSession, ScanState};
use crate::storage::KeyValueStore;

use super::{notify, Notice};

/// Consecutive unreadable frames after which [`ScannerScreen::pump`] gives up.
pub const MAX_UNAVAILABLE_FRAMES: usize = 3;

/// Pulls frames from a capture device into a [`ScanSession`].
#[derive(Debug)]
pub struct ScannerScreen<'a, S: KeyValueStore, D: Decoder, C: CaptureDevice> {
    store: ScanStore<'a, S>,
    session: ScanSession<D>,
    device: C,
    torch: bool,
}

impl<'a, S, D, C> ScannerScreen<'a, S, D, C>
where
    S: KeyValueStore,
    D: Decoder,
    C: CaptureDevice,
{
    /// Create a screen that is ready to scan.
    #[must_use]
    pub fn new(backend: &'a S, decoder: D, device: C) -> Self {
        Self {
            store: ScanStore::new(backend),
            session: ScanSession::new(decoder),
            device,
            torch: false,
        }
    }

    /// Feed frames to the session until one decodes or the device runs dry.
    ///
    /// An unreadable frame produces a notice and scanning carries on with the
    /// next one, until [`MAX_UNAVAILABLE_FRAMES`] fail in a row.
    pub fn pump(&mut self) -> Vec<Notice> {
        let mut notices = Vec::new();
        if matches!(self.session.state(), ScanState::Decoded(_)) {
            return notices;
        }

        let mut unavailable = 0;
        loop {
            let frame = match self.device.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(e @ Error::CaptureUnavailable { .. }) => {
                    notices.push(Notice::from_error("Camera unavailable", &e));
                    unavailable += 1;
                    if unavailable >= MAX_UNAVAILABLE_FRAMES {
                        warn!(
                            "{} unavailable for {} frames, giving up",
                            self.device.name(),
                            unavailable
                        );
                        return notices;
                    }
                    continue;
                }
                Err(e) => {
                    notices.push(Notice::from_error("Scan failed", &e));
                    return notices;
                }
            };
            unavailable = 0;

            match self.session.on_frame(&frame, &self.store) {
                Ok(Some(record)) => {
                    notices.push(
                        Notice::info("Scan successful")
                            .with_message(format!("{} detected", record.kind.label())),
                    );
                    return notices;
                }
                Ok(None) => {}
                Err(e) => {
                    notices.push(Notice::from_error("Could not save scan", &e));
                    return notices;
                }
            }
        }

        debug!(
            "{} ran out of frames after {}",
            self.device.name(),
            self.session.frames_seen()
        );
        notices.push(Notice::error("No QR code found"));
        notices
    }

    /// The decoded record, if any.
    #[must_use]
    pub fn result(&self) -> Option<&ScanRecord> {
        self.session.result()
    }

    /// Scan again.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Whether the flashlight is on.
    #[must_use]
    pub fn torch(&self) -> bool {
        self.torch
    }

    /// Switch the flashlight. Devices without one leave it off.
    pub fn toggle_flashlight(&mut self) -> Option<Notice> {
        match self.device.set_torch(!self.torch) {
            Ok(()) => {
                self.torch = !self.torch;
                None
            }
            Err(e) => {
                warn!("Flashlight unavailable on {}", self.device.name());
                Some(Notice::from_error("Not supported", &e))
            }
        }
    }

    /// Open the decoded link.
    pub fn open_link(&self, opener: &impl LinkOpener) -> Notice {
        notify(self.session.open_link(opener), "Could not open link", |opened| {
            if opened {
                Notice::info("Opened link")
            } else {
                Notice::error("Only links can be opened")
            }
        })
    }
}
