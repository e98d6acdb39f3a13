//! Command tokenizing and parsing.

use super::{MAX_ENCODED_LEN, MAX_TOKENS, TOKEN_SEPARATOR};
use crate::board::PinKind;
use core::fmt::{self, Write as _};
use heapless::{String, Vec};

/// Positional view over the tokens of one command line.
///
/// Holds at most [`MAX_TOKENS`] slices borrowed from the line; anything after
/// the fifth token is dropped. Runs of separators count as one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens<'a> {
    tokens: Vec<&'a str, MAX_TOKENS>,
}

impl<'a> Tokens<'a> {
    /// Token at `index`, `None` when the line had fewer tokens.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).copied()
    }

    /// First token.
    pub fn verb(&self) -> Option<&'a str> {
        self.get(0)
    }

    /// Argument `n`, counted from 1 like `arg1..arg4`.
    pub fn arg(&self, n: usize) -> Option<&'a str> {
        if n == 0 { None } else { self.get(n) }
    }

    /// Number of tokens present.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the line was blank.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().copied()
    }
}

/// Split a command line on spaces.
///
/// ```rust
/// use devino::protocol::tokenize;
///
/// let tokens = tokenize("set  d 3 1");
/// assert_eq!(tokens.verb(), Some("set"));
/// assert_eq!(tokens.arg(3), Some("1"));
/// assert_eq!(tokens.arg(4), None);
/// ```
pub fn tokenize(line: &str) -> Tokens<'_> {
    let mut tokens = Vec::new();
    for token in line
        .split(TOKEN_SEPARATOR)
        .filter(|token| !token.is_empty())
        .take(MAX_TOKENS)
    {
        // Cannot fail: take() bounds the count to the capacity.
        let _ = tokens.push(token);
    }
    Tokens { tokens }
}

/// Parse an integer argument the way C `atoi` does.
///
/// Leading whitespace and one sign are accepted, then as many decimal digits
/// as follow. A token without leading digits is 0. Values past the `i32`
/// range saturate.
///
/// ```rust
/// use devino::protocol::parse_int;
///
/// assert_eq!(parse_int("200"), 200);
/// assert_eq!(parse_int("13abc"), 13);
/// assert_eq!(parse_int("-4"), -4);
/// assert_eq!(parse_int("high"), 0);
/// ```
pub fn parse_int(token: &str) -> i32 {
    let bytes = token.trim_start().as_bytes();
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &byte in digits.iter().take_while(|byte| byte.is_ascii_digit()) {
        let digit = (byte - b'0') as i32;
        value = if negative {
            value.saturating_mul(10).saturating_sub(digit)
        } else {
            value.saturating_mul(10).saturating_add(digit)
        };
    }
    value
}

/// A recognised command.
///
/// Pin and value are kept as parsed; range checks against the board happen
/// at dispatch time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `set {a|d} PIN VALUE`
    Set {
        /// Analog or digital write
        kind: PinKind,
        /// Target pin
        pin: i32,
        /// Duty cycle or level
        value: i32,
    },
    /// `get {a|d} PIN`
    Get {
        /// Analog or digital read
        kind: PinKind,
        /// Source pin
        pin: i32,
    },
}

impl Command {
    /// Build a write command.
    pub fn set(kind: PinKind, pin: i32, value: i32) -> Self {
        Command::Set { kind, pin, value }
    }

    /// Build a read command.
    pub fn get(kind: PinKind, pin: i32) -> Self {
        Command::Get { kind, pin }
    }

    /// Parse a frame payload.
    ///
    /// Returns `None` for anything outside the grammar, including commands
    /// missing a required argument. Extra trailing arguments are ignored.
    pub fn parse(line: &str) -> Option<Self> {
        Self::from_tokens(&tokenize(line))
    }

    /// Interpret already tokenized input.
    pub fn from_tokens(tokens: &Tokens<'_>) -> Option<Self> {
        let kind = PinKind::from_selector(tokens.arg(1)?)?;
        match tokens.verb()? {
            "set" => Some(Command::Set {
                kind,
                pin: parse_int(tokens.arg(2)?),
                value: parse_int(tokens.arg(3)?),
            }),
            "get" => Some(Command::Get {
                kind,
                pin: parse_int(tokens.arg(2)?),
            }),
            _ => None,
        }
    }

    /// Analog or digital.
    pub fn kind(&self) -> PinKind {
        match *self {
            Command::Set { kind, .. } | Command::Get { kind, .. } => kind,
        }
    }

    /// Pin argument as parsed.
    pub fn pin(&self) -> i32 {
        match *self {
            Command::Set { pin, .. } | Command::Get { pin, .. } => pin,
        }
    }

    /// Render as a complete frame, e.g. `<set a 5 200>`.
    pub fn encode(&self) -> Result<String<MAX_ENCODED_LEN>, fmt::Error> {
        let mut out = String::new();
        write!(out, "{}", self)?;
        Ok(out)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Command::Set { kind, pin, value } => {
                write!(f, "<set {} {} {}>", kind.selector(), pin, value)
            }
            Command::Get { kind, pin } => write!(f, "<get {} {}>", kind.selector(), pin),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Command {
    fn format(&self, f: defmt::Formatter) {
        match *self {
            Command::Set { kind, pin, value } => {
                defmt::write!(f, "Set({}, {=i32}, {=i32})", kind, pin, value)
            }
            Command::Get { kind, pin } => defmt::write!(f, "Get({}, {=i32})", kind, pin),
        }
    }
}
