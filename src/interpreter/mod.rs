//! Serial command interpreter.
//!
//! [`Devino`] owns the serial port, the board and the protocol state, and is
//! driven from the firmware's main loop:
//!
//! ```text
//! loop {
//!     devino.process_commands()?;   // never blocks
//!     // ... rest of the firmware ...
//! }
//! ```
//!
//! Each call drains the bytes the port already holds, stops after the first
//! completed frame so one call never runs more than one command, and writes
//! the response frame when transmission is enabled.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Outcome};

use crate::board::{Board, PinKind};
use crate::config::{Config, LineEnding};
use crate::protocol::{Frame, FrameScanner, Response};
use crate::serial::prelude::*;
use crate::serial::{error::Error, write_all};

/// The interpreter.
pub struct Devino<S, B>
where
    S: Serial,
    B: Board,
{
    serial: S,
    board: B,
    scanner: FrameScanner,
    dispatcher: Dispatcher,
    transmit: bool,
    line_ending: LineEnding,
}

impl<S, B> core::fmt::Debug for Devino<S, B>
where
    S: Serial,
    B: Board,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Devino")
            .field("scanner", &self.scanner)
            .field("dispatcher", &self.dispatcher)
            .field("transmit", &self.transmit)
            .field("line_ending", &self.line_ending)
            .finish_non_exhaustive()
    }
}

impl<S, B> Devino<S, B>
where
    S: Serial,
    B: Board,
{
    /// Create an interpreter. The configuration is fixed from here on.
    pub fn new(serial: S, board: B, config: Config) -> Self {
        Self {
            serial,
            board,
            scanner: FrameScanner::new(),
            dispatcher: Dispatcher::new(&config),
            transmit: config.transmit,
            line_ending: config.line_ending,
        }
    }

    /// Poll the serial port and run at most one command.
    ///
    /// Returns `Ok(None)` when the available bytes did not complete a frame.
    /// Bytes left in the port after a completed frame are handled on the
    /// next call.
    pub fn process_commands(&mut self) -> Result<Option<Outcome>, Error> {
        while self.serial.available() > 0 {
            let byte = self.serial.read_byte().map_err(|_| {
                warn!("serial read failed");
                Error::ReadError
            })?;

            if let Some(frame) = self.scanner.consume(byte) {
                return self.run_frame(&frame).map(Some);
            }
        }
        Ok(None)
    }

    /// Dispatch a completed frame and report the result.
    pub fn run_frame(&mut self, frame: &Frame) -> Result<Outcome, Error> {
        let outcome = match frame.as_str() {
            Some(line) => self.dispatcher.dispatch(&mut self.board, line),
            None => Outcome::Ignored,
        };
        self.report(&outcome)?;
        Ok(outcome)
    }

    /// Read an ADC channel, reporting `<RA{pin} {value}>`.
    ///
    /// Returns `None` for a pin outside the board.
    pub fn read_analog(&mut self, pin: u8) -> Result<Option<u16>, Error> {
        self.read(PinKind::Analog, pin)
    }

    /// Read a digital pin, reporting `<RD{pin} {value}>`.
    ///
    /// Returns `None` for a pin outside the board.
    pub fn read_digital(&mut self, pin: u8) -> Result<Option<u8>, Error> {
        Ok(self.read(PinKind::Digital, pin)?.map(|value| value as u8))
    }

    /// PWM write, subject to gating, reporting `<WA{pin} {value}>`.
    pub fn write_analog(&mut self, pin: u8, value: u8) -> Result<Outcome, Error> {
        self.write(PinKind::Analog, pin, value)
    }

    /// Digital write, subject to gating, reporting `<WD{pin} {value}>`.
    pub fn write_digital(&mut self, pin: u8, value: u8) -> Result<Outcome, Error> {
        self.write(PinKind::Digital, pin, value)
    }

    fn read(&mut self, kind: PinKind, pin: u8) -> Result<Option<u16>, Error> {
        let outcome = self.dispatcher.read(&mut self.board, kind, pin);
        self.report(&outcome)?;
        Ok(outcome.response().map(|response| response.value))
    }

    fn write(&mut self, kind: PinKind, pin: u8, value: u8) -> Result<Outcome, Error> {
        let outcome = self.dispatcher.write(&mut self.board, kind, pin, value);
        self.report(&outcome)?;
        Ok(outcome)
    }

    fn report(&mut self, outcome: &Outcome) -> Result<(), Error> {
        match outcome.response() {
            Some(response) if self.transmit => self.send_response(&response),
            _ => Ok(()),
        }
    }

    fn send_response(&mut self, response: &Response) -> Result<(), Error> {
        let frame = response.encode().map_err(|_| Error::BufferOverflow)?;
        write_all(&mut self.serial, frame.as_bytes())?;
        write_all(&mut self.serial, self.line_ending.as_bytes())?;
        self.serial.flush().map_err(|_| Error::WriteError)
    }

    /// Whether response frames are written.
    pub fn transmit(&self) -> bool {
        self.transmit
    }

    /// The frame scanner, e.g. to inspect a pending partial frame.
    pub fn scanner(&self) -> &FrameScanner {
        &self.scanner
    }

    /// The dispatcher and its pin enable table.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Get the underlying serial port
    pub fn serial(&self) -> &S {
        &self.serial
    }

    /// Get a mutable reference to the underlying serial port
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }

    /// Get the underlying board
    pub fn board(&self) -> &B {
        &self.board
    }

    /// Get a mutable reference to the underlying board
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Tear down the interpreter and hand back its collaborators.
    pub fn release(self) -> (S, B) {
        (self.serial, self.board)
    }
}
