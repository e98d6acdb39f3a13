//! Mock serial port and board for interpreter testing

#![allow(dead_code)]

use devino::board::{Board, PIN_COUNT};
use devino::serial::{Read, Serial, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Empty,
    Closed,
}

/// Serial port fed from a byte queue, recording everything written
#[derive(Debug, Default)]
pub struct MockSerial {
    input: Vec<u8>,
    read_pos: usize,
    pub written: Vec<u8>,
    pub closed: bool,
}

impl MockSerial {
    pub fn new(data: &[u8]) -> Self {
        Self {
            input: data.to_vec(),
            ..Self::default()
        }
    }

    /// Simulate more bytes arriving on the line
    pub fn receive(&mut self, data: &[u8]) {
        self.input.extend_from_slice(data);
    }

    /// Everything written so far, as text
    pub fn output(&self) -> &str {
        core::str::from_utf8(&self.written).unwrap()
    }

    pub fn take_output(&mut self) -> String {
        let text = self.output().to_string();
        self.written.clear();
        text
    }
}

impl Read for MockSerial {
    type Error = Error;

    fn available(&mut self) -> usize {
        self.input.len() - self.read_pos
    }

    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let byte = *self.input.get(self.read_pos).ok_or(Error::Empty)?;
        self.read_pos += 1;
        Ok(byte)
    }
}

impl Write for MockSerial {
    type Error = Error;

    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.closed {
            return Err(Error::Closed);
        }
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        if self.closed {
            return Err(Error::Closed);
        }
        Ok(())
    }
}

impl Serial for MockSerial {}

/// One recorded hardware call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    AnalogRead(u8),
    DigitalRead(u8),
    AnalogWrite(u8, u8),
    DigitalWrite(u8, u8),
}

/// Board that loops writes back into reads and records every call
#[derive(Debug, Default)]
pub struct MockBoard {
    pub adc: [u16; PIN_COUNT],
    pub levels: [u8; PIN_COUNT],
    pub duty: [u8; PIN_COUNT],
    pub calls: Vec<Call>,
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls
            .iter()
            .copied()
            .filter(|call| matches!(call, Call::AnalogWrite(..) | Call::DigitalWrite(..)))
            .collect()
    }
}

impl Board for MockBoard {
    fn analog_read(&mut self, pin: u8) -> u16 {
        self.calls.push(Call::AnalogRead(pin));
        self.adc[pin as usize]
    }

    fn digital_read(&mut self, pin: u8) -> u8 {
        self.calls.push(Call::DigitalRead(pin));
        (self.levels[pin as usize] != 0) as u8
    }

    fn analog_write(&mut self, pin: u8, value: u8) {
        self.calls.push(Call::AnalogWrite(pin, value));
        self.duty[pin as usize] = value;
    }

    fn digital_write(&mut self, pin: u8, value: u8) {
        self.calls.push(Call::DigitalWrite(pin, value));
        self.levels[pin as usize] = value;
    }
}
