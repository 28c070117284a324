//! Port pins with `embedded-hal` digital traits
//!
//! A pin carries its bit at runtime so pins of one port share a type and can
//! be grouped in arrays for the LED bank and button pad.

use avr_device::atmega128a::{PORTA, PORTB};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Debug)]
pub struct Pin<PORT, MODE> {
    mask: u8,
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

macro_rules! impl_port {
    ($PORT:ident, $pin:ident, $ddr:ident, $port:ident) => {
        impl<MODE: PinMode> Pin<$PORT, MODE> {
            pub fn into_output(self) -> Pin<$PORT, Output> {
                // Set DDRx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | self.mask));
                }
                Pin::with_mask(self.mask)
            }

            /// Input with the internal pull-up enabled, for switches to ground.
            pub fn into_pull_up_input(self) -> Pin<$PORT, Input> {
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() & !self.mask));
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | self.mask));
                }
                Pin::with_mask(self.mask)
            }
        }

        impl Pin<$PORT, Input> {
            /// Pin `bit` of the port, still in its reset state (input).
            pub fn new(bit: u8) -> Self {
                Self::with_mask(1 << (bit & 7))
            }
        }

        impl OutputPin for Pin<$PORT, Output> {
            type Error = Infallible;

            fn set_high(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | self.mask));
                }
                Ok(())
            }

            fn set_low(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !self.mask));
                }
                Ok(())
            }
        }

        impl StatefulOutputPin for Pin<$PORT, Output> {
            fn is_set_high(&self) -> Result<bool, Self::Error> {
                Ok(unsafe { (*$PORT::ptr()).$port.read().bits() } & self.mask != 0)
            }

            fn is_set_low(&self) -> Result<bool, Self::Error> {
                self.is_set_high().map(|high| !high)
            }
        }

        impl ToggleableOutputPin for Pin<$PORT, Output> {
            type Error = Infallible;

            fn toggle(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() ^ self.mask));
                }
                Ok(())
            }
        }

        impl InputPin for Pin<$PORT, Input> {
            type Error = Infallible;

            fn is_high(&self) -> Result<bool, Self::Error> {
                Ok(unsafe { (*$PORT::ptr()).$pin.read().bits() } & self.mask != 0)
            }

            fn is_low(&self) -> Result<bool, Self::Error> {
                self.is_high().map(|high| !high)
            }
        }
    };
}

impl<PORT, MODE> Pin<PORT, MODE> {
    fn with_mask(mask: u8) -> Self {
        Self {
            mask,
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

impl_port!(PORTA, pina, ddra, porta);
impl_port!(PORTB, pinb, ddrb, portb);

// Board wiring
pub mod board {
    use super::*;

    /// LEDs on PA0..PA3
    pub fn leds() -> [Pin<PORTA, Output>; 4] {
        core::array::from_fn(|bit| Pin::<PORTA, Input>::new(bit as u8).into_output())
    }

    /// Push buttons on PB0..PB3, switching to ground
    pub fn buttons() -> [Pin<PORTB, Input>; 4] {
        core::array::from_fn(|bit| Pin::<PORTB, Input>::new(bit as u8).into_pull_up_input())
    }

    /// OC1A, the buzzer output
    pub const BUZZER_BIT: u8 = 5;
}
