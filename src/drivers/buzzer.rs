//! Piezo buzzer driven by a square wave from a compare-match timer

use crate::board::{Buzzer, Tone};
use crate::tone;

/// Timer channel that toggles an output pin on every compare match.
pub trait ToneOutput {
    /// Prescaler the timer runs with while a tone sounds.
    const PRESCALER: u32;

    fn start(&mut self, compare: u16);
    fn stop(&mut self);
}

pub struct PiezoBuzzer<T> {
    output: T,
    cpu_hz: u32,
    sounding: Option<u32>,
}

impl<T: ToneOutput> PiezoBuzzer<T> {
    pub fn new(output: T, cpu_hz: u32) -> Self {
        Self {
            output,
            cpu_hz,
            sounding: None,
        }
    }

    /// Frequency currently sounding in Hz.
    pub fn frequency(&self) -> Option<u32> {
        self.sounding
    }

    pub fn play_frequency(&mut self, freq_hz: u32) {
        let compare = tone::compare_value(freq_hz, self.cpu_hz, T::PRESCALER);
        self.output.start(compare);
        self.sounding = Some(freq_hz);
    }

    pub fn release(self) -> T {
        self.output
    }
}

impl<T: ToneOutput> Buzzer for PiezoBuzzer<T> {
    fn play(&mut self, tone: Tone, octave: i8) {
        self.play_frequency(tone::frequency(tone, octave));
    }

    fn silence(&mut self) {
        self.output.stop();
        self.sounding = None;
    }
}
