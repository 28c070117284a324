//! Buzzer tone table and octave arithmetic
//!
//! Integer-only so it costs nothing on the AVR.

use crate::board::{Button, Tone};

/// G4, A4, B4, C5 for S1..S4
const BUTTON_FREQ_HZ: [u16; 4] = [392, 440, 494, 523];

/// G5, one octave above S1
const SUCCESS_FREQ_HZ: u16 = 784;

/// Base frequency of a tone before any octave shift.
pub fn base_frequency(tone: Tone) -> u16 {
    match tone {
        Tone::Button(button) => BUTTON_FREQ_HZ[button.index()],
        Tone::Success => SUCCESS_FREQ_HZ,
    }
}

/// Frequency of `tone` raised or lowered by `octave` octaves.
pub fn frequency(tone: Tone, octave: i8) -> u32 {
    let base = base_frequency(tone) as u32;
    let shift = octave.unsigned_abs().min(8) as u32;
    if octave >= 0 {
        base << shift
    } else {
        (base >> shift).max(1)
    }
}

pub fn button_frequency(button: Button, octave: i8) -> u32 {
    frequency(Tone::Button(button), octave)
}

/// Compare value for a timer in CTC toggle mode producing `freq_hz`.
///
/// The output pin toggles on every match, so one period takes two matches:
/// `OCR = f_cpu / (2 * prescaler * f) - 1`, rounded to nearest and clamped to
/// the 16-bit register.
pub fn compare_value(freq_hz: u32, cpu_hz: u32, prescaler: u32) -> u16 {
    if freq_hz == 0 || prescaler == 0 {
        return u16::MAX;
    }
    let divisor = 2 * prescaler * freq_hz;
    let ticks = (cpu_hz + divisor / 2) / divisor;
    ticks.saturating_sub(1).clamp(1, u16::MAX as u32) as u16
}
