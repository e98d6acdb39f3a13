//! Incremental frame scanner.
//!
//! The scanner is fed one byte at a time and hands back a [`Frame`] whenever
//! an end marker closes one. It never fails: bytes outside a frame are
//! skipped, oversized payloads are clamped, and a frame that is never closed
//! simply stays pending.
//!
//! ```rust
//! use devino::protocol::FrameScanner;
//!
//! let mut scanner = FrameScanner::new();
//! let input = b"noise<get d 3><get a 0>";
//!
//! let (used, frame) = scanner.feed(input);
//! assert_eq!(frame.unwrap().as_str(), Some("get d 3"));
//!
//! // The second frame is left for the next call.
//! let (_, frame) = scanner.feed(&input[used..]);
//! assert_eq!(frame.unwrap().as_str(), Some("get a 0"));
//! ```

use super::{END_MARKER, MAX_FRAME_LEN, START_MARKER};
use heapless::Vec;

/// Line buffer size, one slot more than the payload cap.
const BUFFER_SIZE: usize = MAX_FRAME_LEN + 1;

/// Highest write index; once reached, further bytes land in this slot and
/// are cut off when the frame closes.
const LAST_INDEX: usize = BUFFER_SIZE - 1;

/// Payload of one completed frame, markers excluded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    payload: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// Build a frame from raw payload bytes, truncating at [`MAX_FRAME_LEN`].
    pub fn new(bytes: &[u8]) -> Self {
        let len = bytes.len().min(MAX_FRAME_LEN);
        let mut payload = Vec::new();
        // Cannot fail: len is within capacity.
        let _ = payload.extend_from_slice(&bytes[..len]);
        Self { payload }
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.payload
    }

    /// Payload as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.payload).ok()
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the frame was `<>`.
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        match self.as_str() {
            Some(text) => defmt::write!(f, "<{=str}>", text),
            None => defmt::write!(f, "<{=[u8]}>", self.as_bytes()),
        }
    }
}

/// Byte-at-a-time frame accumulator.
///
/// Holds its own state so several scanners can run side by side (one per
/// port, or one per test).
#[derive(Debug, Clone)]
pub struct FrameScanner {
    buffer: [u8; BUFFER_SIZE],
    index: usize,
    armed: bool,
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScanner {
    /// Create an idle scanner waiting for a start marker.
    pub fn new() -> Self {
        Self {
            buffer: [0; BUFFER_SIZE],
            index: 0,
            armed: false,
        }
    }

    /// Advance the state machine by one byte.
    ///
    /// Returns the completed frame when `byte` is the end marker of an
    /// armed scanner. A start marker seen while armed is payload, not a
    /// restart.
    pub fn consume(&mut self, byte: u8) -> Option<Frame> {
        if !self.armed {
            if byte == START_MARKER {
                self.armed = true;
                self.index = 0;
            }
            return None;
        }

        if byte == END_MARKER {
            let frame = Frame::new(&self.buffer[..self.index]);
            self.armed = false;
            self.index = 0;
            return Some(frame);
        }

        self.buffer[self.index] = byte;
        self.index = (self.index + 1).min(LAST_INDEX);
        None
    }

    /// Consume bytes until the first frame completes.
    ///
    /// Returns how many bytes were used and the frame, if any. Bytes after
    /// the completed frame are not touched; pass `&bytes[used..]` on the
    /// next call to continue.
    pub fn feed(&mut self, bytes: &[u8]) -> (usize, Option<Frame>) {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(frame) = self.consume(byte) {
                return (i + 1, Some(frame));
            }
        }
        (bytes.len(), None)
    }

    /// Whether a start marker has been seen and the frame is still open.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Bytes accumulated in the open frame so far (clamped to the cap).
    pub fn pending(&self) -> &[u8] {
        if self.armed {
            &self.buffer[..self.index]
        } else {
            &[]
        }
    }

    /// Drop any partial frame and wait for a new start marker.
    pub fn reset(&mut self) {
        self.armed = false;
        self.index = 0;
    }
}
