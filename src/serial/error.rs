//! Common error types for serial operations

/// A common error type for serial operations.
///
/// Protocol problems (malformed frames, unknown commands, bad pins) are never
/// errors; they are absorbed by the interpreter. Only failures of the serial
/// collaborator itself surface through this type.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The port reported data available but reading it failed.
    ReadError,
    /// Writing a response frame failed or stalled.
    WriteError,
    /// A response did not fit its formatting buffer.
    BufferOverflow,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Error {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::ReadError => defmt::write!(f, "ReadError"),
            Error::WriteError => defmt::write!(f, "WriteError"),
            Error::BufferOverflow => defmt::write!(f, "BufferOverflow"),
        }
    }
}
