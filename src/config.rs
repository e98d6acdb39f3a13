//! Interpreter configuration.
//!
//! All options are fixed when the interpreter is constructed. They can be set
//! in code through the `set_*` methods or loaded from a small JSON document,
//! which is handy when the same firmware image is used on several benches:
//!
//! ```rust
//! use devino::config::{Config, Gating, LineEnding, SetGate};
//!
//! let config = Config::from_json(
//!     r#"{"transmit": true, "gating": "disabled", "set_gate": "unchanged", "line_ending": "crlf"}"#,
//! ).unwrap();
//!
//! assert_eq!(config.gating, Gating::InitiallyDisabled);
//! assert_eq!(config.set_gate, SetGate::Unchanged);
//! assert_eq!(config.line_ending, LineEnding::CrLf);
//! ```

use serde::{Deserialize, Serialize};

/// Per-pin write gating policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gating {
    /// No gating: every valid write reaches the hardware.
    #[default]
    Off,
    /// Gate table in use, every pin starts open.
    #[serde(rename = "enabled")]
    InitiallyEnabled,
    /// Gate table in use, every pin starts closed until it is read once.
    #[serde(rename = "disabled")]
    InitiallyDisabled,
}

/// What a `set` command does to the pin's gate after the write attempt.
///
/// Only meaningful when [`Gating`] is not `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetGate {
    /// Leave the gate as it is.
    #[default]
    Unchanged,
    /// Open the gate.
    Enable,
    /// Close the gate, so the next write needs another read first.
    Disable,
}

/// Trailer appended to every response frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Frames back to back, `<RA0 512><WD3 1>`.
    #[default]
    None,
    /// One frame per line, for terminals and line-oriented readers.
    CrLf,
}

impl LineEnding {
    /// Bytes written after each frame.
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::None => b"",
            LineEnding::CrLf => b"\r\n",
        }
    }
}

/// Error returned when a configuration document cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The document is not valid JSON or has unknown values.
    ParseError,
    /// The output buffer is too small for the serialized document.
    BufferOverflow,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            ConfigError::ParseError => defmt::write!(f, "ParseError"),
            ConfigError::BufferOverflow => defmt::write!(f, "BufferOverflow"),
        }
    }
}

/// Construction-time options of the interpreter.
///
/// The default transmits responses, does no gating and writes frames
/// without a line ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether response frames are written at all.
    pub transmit: bool,
    /// Per-pin write gating.
    pub gating: Gating,
    /// Effect of `set` commands on the gate.
    pub set_gate: SetGate,
    /// Trailer after each response frame.
    pub line_ending: LineEnding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transmit: true,
            gating: Gating::Off,
            set_gate: SetGate::Unchanged,
            line_ending: LineEnding::None,
        }
    }
}

impl Config {
    /// Parse a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let (config, _) =
            serde_json_core::from_str::<Config>(json).map_err(|_| ConfigError::ParseError)?;
        Ok(config)
    }

    /// Serialize into `buf`, returning the number of bytes written.
    pub fn to_json(&self, buf: &mut [u8]) -> Result<usize, ConfigError> {
        serde_json_core::to_slice(self, buf).map_err(|_| ConfigError::BufferOverflow)
    }

    /// Enable or disable response frames.
    pub fn set_transmit(&mut self, enabled: bool) {
        self.transmit = enabled;
    }

    /// Choose the gating policy.
    pub fn set_gating(&mut self, gating: Gating) {
        self.gating = gating;
    }

    /// Choose what `set` does to the gate.
    pub fn set_set_gate(&mut self, set_gate: SetGate) {
        self.set_gate = set_gate;
    }

    /// Choose the response trailer.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }
}
