//! Text console over any `embedded-hal` serial port

use embedded_hal::serial::{Read, Write};
use ufmt::uWrite;

use crate::board::Console;
use crate::report::Report;

pub struct SerialConsole<U> {
    uart: U,
}

impl<U> SerialConsole<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: Write<u8>> SerialConsole<U> {
    pub fn write_byte(&mut self, byte: u8) -> Result<(), U::Error> {
        nb::block!(self.uart.write(byte))
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), U::Error> {
        self.write_bytes(s.as_bytes())
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), U::Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    pub fn flush(&mut self) -> Result<(), U::Error> {
        nb::block!(self.uart.flush())
    }

    // Debug helper - print hex value
    pub fn write_hex(&mut self, val: u8) -> Result<(), U::Error> {
        const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
        self.write_byte(HEX_CHARS[(val >> 4) as usize])?;
        self.write_byte(HEX_CHARS[(val & 0xF) as usize])
    }

    // Print formatted debug info
    pub fn debug(&mut self, msg: &str, val: u8) -> Result<(), U::Error> {
        self.write_str("[DBG] ")?;
        self.write_str(msg)?;
        self.write_str(": 0x")?;
        self.write_hex(val)?;
        self.write_str("\r\n")
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), U::Error> {
        for byte in bytes {
            self.write_byte(*byte)?;
        }
        Ok(())
    }
}

impl<U: Read<u8>> SerialConsole<U> {
    /// Next received byte, if one is waiting. Receive errors drop the byte.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.uart.read().ok()
    }
}

impl<U: Write<u8>> uWrite for SerialConsole<U> {
    type Error = U::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.write_bytes(s.as_bytes())
    }
}

impl<U: Write<u8>> Console for SerialConsole<U> {
    fn report(&mut self, report: &Report<'_>) {
        let _ = report.write_to(self);
    }
}
