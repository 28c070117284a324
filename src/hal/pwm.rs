//! Square-wave tone output on Timer1 channel A
//!
//! Timer1 runs in CTC mode with OCR1A as top and toggles OC1A (PB5) on every
//! compare match, so the pin frequency is `f_cpu / (2 * 8 * (OCR1A + 1))`.

use avr_device::atmega128a::{PORTB, TC1};

use crate::drivers::ToneOutput;
use crate::hal::gpio::board::BUZZER_BIT;

// TCCR1A
const COM1A0: u8 = 1 << 6;
// TCCR1B
const WGM12: u8 = 1 << 3;
const CS11: u8 = 1 << 1;

pub struct ToneTimer {
    tc1: TC1,
}

impl ToneTimer {
    pub fn new(tc1: TC1, portb: &PORTB) -> Self {
        portb
            .ddrb
            .modify(|r, w| unsafe { w.bits(r.bits() | (1 << BUZZER_BIT)) });
        tc1.tccr1a.write(|w| unsafe { w.bits(0) });
        tc1.tccr1b.write(|w| unsafe { w.bits(0) });
        Self { tc1 }
    }

    pub fn release(mut self) -> TC1 {
        self.stop();
        self.tc1
    }
}

impl ToneOutput for ToneTimer {
    const PRESCALER: u32 = 8;

    fn start(&mut self, compare: u16) {
        self.tc1.ocr1a.write(|w| unsafe { w.bits(compare) });
        self.tc1.tcnt1.write(|w| unsafe { w.bits(0) });
        self.tc1.tccr1a.write(|w| unsafe { w.bits(COM1A0) });
        self.tc1.tccr1b.write(|w| unsafe { w.bits(WGM12 | CS11) });
    }

    fn stop(&mut self) {
        self.tc1.tccr1b.write(|w| unsafe { w.bits(0) });
        // Disconnect OC1A so the pin falls back to its PORTB value
        self.tc1.tccr1a.write(|w| unsafe { w.bits(0) });
        unsafe {
            (*PORTB::ptr())
                .portb
                .modify(|r, w| w.bits(r.bits() & !(1 << BUZZER_BIT)));
        }
    }
}
