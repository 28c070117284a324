//! Bank of four indicator LEDs, one per game button

use embedded_hal::digital::v2::OutputPin;

use crate::board::{Display, Frame};

pub struct LedBank<P> {
    leds: [P; 4],
    pattern: u8,
}

impl<P: OutputPin> LedBank<P> {
    pub fn new(leds: [P; 4]) -> Self {
        Self { leds, pattern: 0 }
    }

    /// Light LED `i` for every set bit `i` of `pattern`.
    pub fn set_pattern(&mut self, pattern: u8) -> Result<(), P::Error> {
        for (i, led) in self.leds.iter_mut().enumerate() {
            if (pattern & (1 << i)) != 0 {
                led.set_high()?;
            } else {
                led.set_low()?;
            }
        }
        self.pattern = pattern & 0x0F;
        Ok(())
    }

    /// Last pattern written successfully.
    pub fn pattern(&self) -> u8 {
        self.pattern
    }

    pub fn release(self) -> [P; 4] {
        self.leds
    }
}

impl<P: OutputPin> Display for LedBank<P> {
    fn show(&mut self, frame: Frame) {
        let _ = self.set_pattern(frame.led_pattern());
    }

    fn clear(&mut self) {
        let _ = self.set_pattern(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Button;
    use embedded_hal_mock::pin::{Mock as PinMock, State, Transaction};

    fn bank(states: [&[State]; 4]) -> ([PinMock; 4], LedBank<PinMock>) {
        let pins: [PinMock; 4] = core::array::from_fn(|i| {
            let expectations: std::vec::Vec<Transaction> =
                states[i].iter().map(|s| Transaction::set(s.clone())).collect();
            PinMock::new(&expectations)
        });
        let handles = pins.clone();
        (handles, LedBank::new(pins))
    }

    #[test]
    fn pattern_maps_bits_to_pins() {
        use State::{High, Low};
        let (mut pins, mut leds) = bank([&[High], &[Low], &[High], &[Low]]);

        leds.set_pattern(0b0101).unwrap();
        assert_eq!(leds.pattern(), 0b0101);

        for pin in pins.iter_mut() {
            pin.done();
        }
    }

    #[test]
    fn frames_drive_the_bank() {
        use State::{High, Low};
        let (mut pins, mut leds) = bank([
            &[Low, High, Low],
            &[Low, High, Low],
            &[High, High, Low],
            &[Low, High, Low],
        ]);

        leds.show(Frame::Button(Button::S3));
        leds.show(Frame::Success);
        leds.clear();
        assert_eq!(leds.pattern(), 0);

        for pin in pins.iter_mut() {
            pin.done();
        }
    }
}
