//! Response frames.
//!
//! The device answers reads with `<R{A|D}{pin} {value}>` and acknowledges
//! writes with `<W{A|D}{pin} {value}>`. This module renders those frames on
//! the device and picks them back out of a received text stream on the host,
//! where they arrive interleaved with whatever else the firmware prints.

use super::{END_MARKER, MAX_ENCODED_LEN, START_MARKER};
use crate::board::PinKind;
use core::fmt::{self, Write as _};
use heapless::String;

/// Whether a response reports a read or acknowledges a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// `R`: value sampled from the pin
    Read,
    /// `W`: value just written to the pin
    Write,
}

impl Access {
    /// Leading tag character.
    pub fn tag(self) -> char {
        match self {
            Access::Read => 'R',
            Access::Write => 'W',
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(c: char) -> Option<Self> {
        match c {
            'R' => Some(Access::Read),
            'W' => Some(Access::Write),
            _ => None,
        }
    }
}

/// One decoded or to-be-encoded response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    /// Read report or write acknowledgment
    pub access: Access,
    /// Analog or digital
    pub kind: PinKind,
    /// Pin index
    pub pin: u8,
    /// Raw value (ADC count, duty cycle or level)
    pub value: u16,
}

impl Response {
    /// Report of a completed read.
    pub fn read(kind: PinKind, pin: u8, value: u16) -> Self {
        Self {
            access: Access::Read,
            kind,
            pin,
            value,
        }
    }

    /// Acknowledgment of a completed write.
    pub fn write(kind: PinKind, pin: u8, value: u8) -> Self {
        Self {
            access: Access::Write,
            kind,
            pin,
            value: value as u16,
        }
    }

    /// Decode a frame body such as `RA0 512` (markers already stripped).
    pub fn parse(body: &str) -> Option<Self> {
        let mut chars = body.chars();
        let access = Access::from_tag(chars.next()?)?;
        let kind = PinKind::from_tag(chars.next()?)?;

        let (pin, value) = chars.as_str().split_once(' ')?;
        Some(Self {
            access,
            kind,
            pin: pin.parse().ok()?,
            value: value.parse().ok()?,
        })
    }

    /// Render as a complete frame.
    pub fn encode(&self) -> Result<String<MAX_ENCODED_LEN>, fmt::Error> {
        let mut out = String::new();
        write!(out, "{}", self)?;
        Ok(out)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<{}{}{} {}>",
            self.access.tag(),
            self.kind.tag(),
            self.pin,
            self.value
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Response {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "<{=char}{=char}{=u8} {=u16}>",
            self.access.tag(),
            self.kind.tag(),
            self.pin,
            self.value
        )
    }
}

/// A piece of received text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text outside any frame, e.g. the firmware's own prints
    Text(&'a str),
    /// A well formed response frame
    Response(Response),
    /// A frame whose body is not a response
    Unrecognized(&'a str),
}

/// Split received text into frames and the text around them.
///
/// A frame runs from `<` to the nearest `>` on the same line. An opening
/// marker with no closing one before the end of the line is plain text.
/// A frame body may batch several responses separated by `,`
/// (`<RA0 5,RA1 6>`); each part is yielded as its own segment.
///
/// ```rust
/// use devino::protocol::{responses, Response, Segment};
/// use devino::board::PinKind;
///
/// let mut segments = responses("boot ok\r\n<RA0 512>");
/// assert_eq!(segments.next(), Some(Segment::Text("boot ok\r\n")));
/// assert_eq!(
///     segments.next(),
///     Some(Segment::Response(Response::read(PinKind::Analog, 0, 512)))
/// );
/// assert_eq!(segments.next(), None);
/// ```
pub fn responses(text: &str) -> Segments<'_> {
    Segments {
        text,
        pos: 0,
        batch: None,
    }
}

/// Separator between responses batched in one frame.
const BATCH_SEPARATOR: char = ',';

/// Iterator returned by [`responses`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    pos: usize,
    batch: Option<core::str::Split<'a, char>>,
}

fn decode(part: &str) -> Segment<'_> {
    match Response::parse(part) {
        Some(response) => Segment::Response(response),
        None => Segment::Unrecognized(part),
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(part) = self.batch.as_mut().and_then(Iterator::next) {
            return Some(decode(part));
        }
        self.batch = None;

        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        match find_frame(rest.as_bytes()) {
            Some((0, end)) => {
                self.pos += end + 1;
                let body = &rest[1..end];
                let mut parts = body.split(BATCH_SEPARATOR);
                let first = parts.next().unwrap_or(body);
                self.batch = Some(parts);
                Some(decode(first))
            }
            Some((start, _)) => {
                self.pos += start;
                Some(Segment::Text(&rest[..start]))
            }
            None => {
                self.pos = self.text.len();
                Some(Segment::Text(rest))
            }
        }
    }
}

/// Locate the first `<...>` span not crossing a newline. Returns the
/// positions of both markers.
fn find_frame(bytes: &[u8]) -> Option<(usize, usize)> {
    let mut search = 0;
    while let Some(offset) = bytes[search..].iter().position(|&b| b == START_MARKER) {
        let start = search + offset;
        let body = &bytes[start + 1..];
        match body.iter().position(|&b| b == END_MARKER || b == b'\n') {
            Some(len) if body[len] == END_MARKER => return Some((start, start + 1 + len)),
            _ => search = start + 1,
        }
    }
    None
}
