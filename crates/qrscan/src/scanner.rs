//! The scan workflow.
//!
//! A session starts in [`ScanState::Scanning`] and feeds every frame to the
//! decoder. The first successful decode is classified, recorded, and moves the
//! session to [`ScanState::Decoded`], where further frames are ignored until
//! [`ScanSession::reset`].

use tracing::{debug, info};

use crate::codec::{Decoder, Frame};
use crate::error::Result;
use crate::record::{ScanDraft, ScanRecord};
use crate::records::ScanStore;
use crate::storage::KeyValueStore;

/// Where the scan workflow is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Waiting for a frame that decodes.
    Scanning,
    /// A symbol was read and recorded.
    Decoded(ScanRecord),
}

/// Opens links outside the application.
pub trait LinkOpener {
    /// Open `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if no handler could be launched.
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens links with the operating system's default handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        open::that(url)?;
        Ok(())
    }
}

/// One run of the scan workflow.
#[derive(Debug)]
pub struct ScanSession<D: Decoder> {
    decoder: D,
    state: ScanState,
    frames_seen: u64,
}

impl<D: Decoder> ScanSession<D> {
    /// Start scanning.
    #[must_use]
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            state: ScanState::Scanning,
            frames_seen: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// The decoded record, once there is one.
    #[must_use]
    pub fn result(&self) -> Option<&ScanRecord> {
        match &self.state {
            ScanState::Decoded(record) => Some(record),
            ScanState::Scanning => None,
        }
    }

    /// Frames handed to the decoder since the last reset.
    #[must_use]
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Handle one frame.
    ///
    /// Returns the new record when this frame produced the first decode.
    /// Frames arriving after a decode are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if recording the decoded content fails; the session
    /// then stays in `Scanning`.
    pub fn on_frame<S: KeyValueStore>(
        &mut self,
        frame: &Frame,
        store: &ScanStore<'_, S>,
    ) -> Result<Option<&ScanRecord>> {
        if matches!(self.state, ScanState::Decoded(_)) {
            return Ok(None);
        }

        self.frames_seen += 1;
        let Some(content) = self.decoder.decode(frame) else {
            return Ok(None);
        };

        let record = store.add(ScanDraft::from_decoded(content))?;
        info!("Decoded {} after {} frames", record.kind, self.frames_seen);
        self.state = ScanState::Decoded(record);
        Ok(self.result())
    }

    /// Return to scanning.
    pub fn reset(&mut self) {
        debug!("Scan session reset");
        self.state = ScanState::Scanning;
        self.frames_seen = 0;
    }

    /// Open the decoded link, if the result is a URL.
    ///
    /// Returns `false` when there is nothing to open. The state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the opener fails.
    pub fn open_link(&self, opener: &impl LinkOpener) -> Result<bool> {
        match self.result() {
            Some(record) if record.is_link() => {
                opener.open(&record.content)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
