//! Bracket-framed ASCII protocol.
//!
//! ```text
//! ┌──────────────┐   Frame   ┌──────────────┐  Command  ┌──────────────┐
//! │ FrameScanner │──────────▶│   Tokens     │──────────▶│  Dispatcher  │
//! │ (bytes)      │           │ (positional) │           │ (interpreter)│
//! └──────────────┘           └──────────────┘           └──────────────┘
//! ```
//!
//! A frame is everything between [`START_MARKER`] and [`END_MARKER`]. There
//! is no escaping, so neither marker can appear inside a payload, and no
//! checksum. Payloads longer than [`MAX_FRAME_LEN`] are truncated.

#![deny(unsafe_code)]

pub mod command;
pub mod response;
pub mod scanner;


pub use command::{Command, Tokens, parse_int, tokenize};
pub use response::{Access, Response, Segment, responses};
pub use scanner::{Frame, FrameScanner};

/// Byte that opens a frame.
pub const START_MARKER: u8 = b'<';

/// Byte that closes a frame.
pub const END_MARKER: u8 = b'>';

/// Maximum payload length of a frame in bytes.
pub const MAX_FRAME_LEN: usize = 63;

/// Separator between command tokens.
pub const TOKEN_SEPARATOR: char = ' ';

/// Verb plus up to four arguments.
pub const MAX_TOKENS: usize = 5;

/// Capacity for one encoded frame including both markers.
pub const MAX_ENCODED_LEN: usize = MAX_FRAME_LEN + 2;
