//! # devino - serial pin debugging for microcontrollers
//!
//! A small command interpreter that reads bracketed ASCII commands from a
//! serial link and turns them into analog/digital pin reads and writes,
//! optionally reporting each result back over the same link. It is meant as
//! a development aid: flash it next to your firmware and poke pins from a
//! terminal or a host utility.
//!
//! ## Wire Protocol
//!
//! ```text
//! <set a PIN VALUE>   analog write          -> <WA{pin} {value}>
//! <set d PIN VALUE>   digital write         -> <WD{pin} {value}>
//! <get a PIN>         analog read           -> <RA{pin} {value}>
//! <get d PIN>         digital read          -> <RD{pin} {value}>
//! ```
//!
//! Anything outside a `<...>` frame is ignored, unknown commands are dropped
//! silently, and no error frames are ever sent back.
//!
//! ## Features
//!
//! - **Frame scanning**: non-blocking, byte-at-a-time framing with a fixed
//!   63 byte payload cap
//! - **Command dispatch**: fixed grammar with C `atoi` argument semantics
//! - **Pin gating**: optional per-pin enable table guarding writes
//! - **Host side**: command encoding and response decoding for the peer
//!
//! ## Usage
//!
//! ```rust,no_run
//! use devino::board::Board;
//! use devino::config::{Config, Gating};
//! use devino::interpreter::Devino;
//! # struct Uart;
//! # impl devino::serial::Read for Uart {
//! #     type Error = ();
//! #     fn available(&mut self) -> usize { 0 }
//! #     fn read_byte(&mut self) -> Result<u8, Self::Error> { Err(()) }
//! # }
//! # impl devino::serial::Write for Uart {
//! #     type Error = ();
//! #     fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> { Ok(buf.len()) }
//! #     fn flush(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # impl devino::serial::Serial for Uart {}
//! # struct Pins;
//! # impl Board for Pins {
//! #     fn analog_read(&mut self, _pin: u8) -> u16 { 0 }
//! #     fn digital_read(&mut self, _pin: u8) -> u8 { 0 }
//! #     fn analog_write(&mut self, _pin: u8, _value: u8) {}
//! #     fn digital_write(&mut self, _pin: u8, _value: u8) {}
//! # }
//!
//! let mut config = Config::default();
//! config.set_gating(Gating::InitiallyDisabled);
//!
//! let mut devino = Devino::new(Uart, Pins, config);
//!
//! loop {
//!     // Drains whatever bytes are available and dispatches at most one frame.
//!     let _ = devino.process_commands();
//! }
//! ```
//!
//! ## Optional Features
//!
//! - `std`: Enable standard library support (default: disabled)
//! - `defmt`: Enable defmt logging support for embedded debugging

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![warn(missing_debug_implementations)]

#[macro_use]
mod fmt;

/// Serial transport abstraction consumed by the interpreter.
///
/// The interpreter never configures the port itself; it only asks how many
/// bytes are waiting, reads them one at a time and writes response frames.
pub mod serial;

/// Hardware pin abstraction and the per-pin enable table.
pub mod board;

/// Wire protocol: frame scanning, command tokenizing and response encoding.
///
/// Everything in here is pure and allocation-free, so it is shared by the
/// device side (the interpreter) and the host side talking to it.
pub mod protocol;

/// Construction-time configuration of the interpreter.
pub mod config;

/// The command interpreter tying serial, protocol and board together.
pub mod interpreter;
