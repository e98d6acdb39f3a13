//! Command dispatch.
//!
//! Turns one frame payload into at most one board call. The dispatcher owns
//! the pin enable table and nothing else; every other input (the line, the
//! board) is passed in per call, and the result comes back as an
//! [`Outcome`] describing what happened and what, if anything, should be
//! reported to the peer.

use crate::board::{self, Board, PinGate, PinKind};
use crate::config::{Config, Gating, SetGate};
use crate::protocol::{Command, Response};

/// Result of dispatching one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A pin was read; the response carries the value.
    Read(Response),
    /// A pin was written; the response echoes the value.
    Wrote(Response),
    /// A write was blocked by a closed gate.
    Gated {
        /// Write kind
        kind: PinKind,
        /// Blocked pin
        pin: u8,
    },
    /// Pin or value outside what the board accepts; nothing was done.
    OutOfRange,
    /// Not a command in the grammar; nothing was done.
    Ignored,
}

impl Outcome {
    /// Response frame owed to the peer, if any.
    pub fn response(&self) -> Option<Response> {
        match *self {
            Outcome::Read(response) | Outcome::Wrote(response) => Some(response),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Outcome {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Outcome::Read(response) => defmt::write!(f, "Read({})", response),
            Outcome::Wrote(response) => defmt::write!(f, "Wrote({})", response),
            Outcome::Gated { kind, pin } => defmt::write!(f, "Gated({}, {=u8})", kind, pin),
            Outcome::OutOfRange => defmt::write!(f, "OutOfRange"),
            Outcome::Ignored => defmt::write!(f, "Ignored"),
        }
    }
}

/// Maps commands onto board calls, applying the gating policy.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    gate: PinGate,
    set_gate: SetGate,
}

impl Dispatcher {
    /// Create a dispatcher with the gate table initialised from `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            gate: PinGate::new(config.gating),
            set_gate: config.set_gate,
        }
    }

    /// The pin enable table.
    pub fn gate(&self) -> &PinGate {
        &self.gate
    }

    /// Parse and execute one frame payload.
    pub fn dispatch<B: Board>(&mut self, board: &mut B, line: &str) -> Outcome {
        trace!("dispatch \"{=str}\"", line);
        match Command::parse(line) {
            Some(command) => self.execute(board, command),
            None => Outcome::Ignored,
        }
    }

    /// Execute an already parsed command.
    ///
    /// A `get` opens the pin's gate; this is the only place the gate is
    /// opened by a read.
    pub fn execute<B: Board>(&mut self, board: &mut B, command: Command) -> Outcome {
        trace!("execute {} on pin {=i32}", command.kind(), command.pin());
        match command {
            Command::Get { kind, pin } => match board::pin_index(pin) {
                Some(pin) => {
                    let outcome = self.read(board, kind, pin);
                    self.gate.enable(pin);
                    outcome
                }
                None => Outcome::OutOfRange,
            },
            Command::Set { kind, pin, value } => {
                match (board::pin_index(pin), board::write_value(value)) {
                    (Some(pin), Some(value)) => self.write(board, kind, pin, value),
                    _ => Outcome::OutOfRange,
                }
            }
        }
    }

    /// Read a pin. Reads are never gated and leave the gate table untouched.
    pub fn read<B: Board>(&mut self, board: &mut B, kind: PinKind, pin: u8) -> Outcome {
        if board::pin_index(pin as i32).is_none() {
            return Outcome::OutOfRange;
        }

        let value = match kind {
            PinKind::Analog => board.analog_read(pin),
            PinKind::Digital => board.digital_read(pin) as u16,
        };

        Outcome::Read(Response::read(kind, pin, value))
    }

    /// Write a pin if its gate allows it, then apply the `set` gate policy.
    pub fn write<B: Board>(&mut self, board: &mut B, kind: PinKind, pin: u8, value: u8) -> Outcome {
        if board::pin_index(pin as i32).is_none() {
            return Outcome::OutOfRange;
        }

        let outcome = if self.gate.allows(pin) {
            match kind {
                PinKind::Analog => board.analog_write(pin, value),
                PinKind::Digital => board.digital_write(pin, value),
            }
            Outcome::Wrote(Response::write(kind, pin, value))
        } else {
            debug!("write to pin {=u8} blocked by gate", pin);
            Outcome::Gated { kind, pin }
        };

        if self.gate.mode() != Gating::Off {
            match self.set_gate {
                SetGate::Unchanged => {}
                SetGate::Enable => self.gate.enable(pin),
                SetGate::Disable => self.gate.disable(pin),
            }
        }

        outcome
    }
}
