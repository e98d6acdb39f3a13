//! A serial abstraction layer for the interpreter
//!
//! The interpreter is driven by a polling loop and must never block, so the
//! receive side is modelled the way Arduino-style cores expose a UART: a
//! count of bytes already buffered plus a single-byte read. The transmit side
//! is a plain slice writer.
//!

#![allow(missing_docs)]
#![deny(unsafe_code)]

/// Common error types for serial operations
pub mod error;

/// Re-exports of common traits
pub mod prelude {
    pub use super::{Read, Serial, Write};
}

pub trait Read {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Number of bytes that can be read right now without waiting
    fn available(&mut self) -> usize;
    /// Read the next buffered byte
    ///
    /// Only called after [`available`](Read::available) reported data.
    fn read_byte(&mut self) -> Result<u8, Self::Error>;
}

pub trait Write {
    /// Associated error type
    type Error: core::fmt::Debug;
    /// Write data to the port, returning how many bytes were accepted
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error>;
    /// Flush the write buffer
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A bidirectional serial port
pub trait Serial: Read + Write {}

/// Write the whole buffer, retrying on short writes.
///
/// A write that accepts zero bytes is reported as
/// [`Error::WriteError`](error::Error::WriteError) rather than spinning.
pub fn write_all<W: Write + ?Sized>(port: &mut W, mut buf: &[u8]) -> Result<(), error::Error> {
    while !buf.is_empty() {
        match port.write(buf) {
            Ok(0) => return Err(error::Error::WriteError),
            Ok(n) => buf = &buf[n.min(buf.len())..],
            Err(_) => return Err(error::Error::WriteError),
        }
    }
    Ok(())
}
