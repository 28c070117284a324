//! Four push buttons read as a bitmask

use embedded_hal::digital::v2::InputPin;

pub struct ButtonPad<P> {
    pins: [P; 4],
    active_low: bool,
}

impl<P: InputPin> ButtonPad<P> {
    /// Buttons pulling the line to ground when pressed.
    pub fn new(pins: [P; 4]) -> Self {
        Self {
            pins,
            active_low: true,
        }
    }

    pub fn active_high(pins: [P; 4]) -> Self {
        Self {
            pins,
            active_low: false,
        }
    }

    /// Raw pressed state, S1 in bit 0. Not debounced.
    pub fn read_mask(&self) -> Result<u8, P::Error> {
        let mut mask = 0;
        for (i, pin) in self.pins.iter().enumerate() {
            let pressed = if self.active_low {
                pin.is_low()?
            } else {
                pin.is_high()?
            };
            if pressed {
                mask |= 1 << i;
            }
        }
        Ok(mask)
    }

    pub fn release(self) -> [P; 4] {
        self.pins
    }
}
