//! Hardware pin abstraction.
//!
//! The interpreter never touches registers; it calls into a [`Board`]
//! implementation supplied by the firmware. The four operations mirror the
//! Arduino core calls the protocol was designed around.
//!
//! # Pin numbering
//!
//! Pins are plain indices in `0..PIN_COUNT`. For analog reads the index is
//! the ADC channel (`get a 0` reads A0), for every other operation it is the
//! digital pin number. Indices outside that range are rejected before the
//! board is called.
//!
//! # Example
//!
//! ```rust
//! use devino::board::Board;
//!
//! struct Simulated {
//!     levels: [u8; devino::board::PIN_COUNT],
//! }
//!
//! impl Board for Simulated {
//!     fn analog_read(&mut self, pin: u8) -> u16 { self.levels[pin as usize] as u16 * 4 }
//!     fn digital_read(&mut self, pin: u8) -> u8 { (self.levels[pin as usize] > 0) as u8 }
//!     fn analog_write(&mut self, pin: u8, value: u8) { self.levels[pin as usize] = value; }
//!     fn digital_write(&mut self, pin: u8, value: u8) { self.levels[pin as usize] = value; }
//! }
//! ```

/// Per-pin enable table guarding writes.
pub mod gate;

pub use gate::PinGate;

/// Number of addressable pins (`0..PIN_COUNT`).
pub const PIN_COUNT: usize = 14;

/// Largest value accepted by a write. Both write kinds take one byte.
pub const MAX_WRITE_VALUE: i32 = u8::MAX as i32;

/// Hardware access used by the interpreter.
///
/// Implementations must tolerate any pin in `0..PIN_COUNT`; what happens on
/// a pin the chip cannot drive (e.g. PWM on a non-PWM pin) is up to the
/// implementation.
pub trait Board {
    /// Sample the ADC channel `pin`.
    fn analog_read(&mut self, pin: u8) -> u16;

    /// Read the logic level of `pin` (0 or 1).
    fn digital_read(&mut self, pin: u8) -> u8;

    /// Drive `pin` with a PWM duty cycle of `value / 255`.
    fn analog_write(&mut self, pin: u8, value: u8);

    /// Drive `pin` low when `value` is 0, high otherwise.
    fn digital_write(&mut self, pin: u8, value: u8);
}

/// Analog or digital side of a pin operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinKind {
    /// PWM output / ADC input
    Analog,
    /// Logic level
    Digital,
}

impl PinKind {
    /// Parse the command selector (`a` or `d`).
    pub fn from_selector(token: &str) -> Option<Self> {
        match token {
            "a" => Some(PinKind::Analog),
            "d" => Some(PinKind::Digital),
            _ => None,
        }
    }

    /// Selector used in commands (`a` / `d`).
    pub fn selector(self) -> char {
        match self {
            PinKind::Analog => 'a',
            PinKind::Digital => 'd',
        }
    }

    /// Tag used in responses (`A` / `D`).
    pub fn tag(self) -> char {
        match self {
            PinKind::Analog => 'A',
            PinKind::Digital => 'D',
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(c: char) -> Option<Self> {
        match c {
            'A' => Some(PinKind::Analog),
            'D' => Some(PinKind::Digital),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            PinKind::Analog => defmt::write!(f, "Analog"),
            PinKind::Digital => defmt::write!(f, "Digital"),
        }
    }
}

/// Validate a parsed pin argument.
pub fn pin_index(raw: i32) -> Option<u8> {
    if (0..PIN_COUNT as i32).contains(&raw) {
        Some(raw as u8)
    } else {
        None
    }
}

/// Validate a parsed write value.
pub fn write_value(raw: i32) -> Option<u8> {
    if (0..=MAX_WRITE_VALUE).contains(&raw) {
        Some(raw as u8)
    } else {
        None
    }
}
