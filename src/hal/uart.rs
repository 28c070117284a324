//! Polled USART0 implementing the `embedded-hal` serial traits

use avr_device::atmega128a::USART0;
use core::convert::Infallible;
use embedded_hal::serial::{Read, Write};

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

// UCSR0A
const RXC: u8 = 1 << 7;
const UDRE: u8 = 1 << 5;
const FE: u8 = 1 << 4;
const DOR: u8 = 1 << 3;
// UCSR0B
const RXEN: u8 = 1 << 4;
const TXEN: u8 = 1 << 3;
// UCSR0C: asynchronous, 8 data bits, no parity, 1 stop bit
const FRAME_8N1: u8 = 0b0000_0110;

/// (16_000_000 / (16 * 9600)) - 1 = 103
pub const fn ubrr(cpu_hz: u32, baud: u32) -> u16 {
    ((cpu_hz + baud * 8) / (baud * 16) - 1) as u16
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UartError {
    Framing,
    Overrun,
}

pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        let divisor = ubrr(CPU_FREQ_HZ, UART_BAUD);
        usart.ubrr0h.write(|w| unsafe { w.bits((divisor >> 8) as u8) });
        usart.ubrr0l.write(|w| unsafe { w.bits(divisor as u8) });
        usart.ucsr0c.write(|w| unsafe { w.bits(FRAME_8N1) });
        usart.ucsr0b.write(|w| unsafe { w.bits(RXEN | TXEN) });
        Self { usart }
    }

    pub fn release(self) -> USART0 {
        self.usart.ucsr0b.write(|w| unsafe { w.bits(0) });
        self.usart
    }
}

impl Read<u8> for Uart {
    type Error = UartError;

    fn read(&mut self) -> nb::Result<u8, Self::Error> {
        let status = self.usart.ucsr0a.read().bits();
        if status & RXC == 0 {
            return Err(nb::Error::WouldBlock);
        }
        // UDR must be read to clear the flags either way
        let byte = self.usart.udr0.read().bits();
        if status & FE != 0 {
            Err(nb::Error::Other(UartError::Framing))
        } else if status & DOR != 0 {
            Err(nb::Error::Other(UartError::Overrun))
        } else {
            Ok(byte)
        }
    }
}

impl Write<u8> for Uart {
    type Error = Infallible;

    fn write(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        if self.usart.ucsr0a.read().bits() & UDRE == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.usart.udr0.write(|w| unsafe { w.bits(byte) });
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        if self.usart.ucsr0a.read().bits() & UDRE == 0 {
            Err(nb::Error::WouldBlock)
        } else {
            Ok(())
        }
    }
}
