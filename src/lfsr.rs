//! 32-bit Galois LFSR used to generate the game sequence

use crate::board::Button;
use crate::config::DEFAULT_SEED;

/// Taps 32, 22, 2, 1: maximal-length polynomial
const FEEDBACK_MASK: u32 = 0x8020_0003;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lfsr {
    state: u32,
}

impl Lfsr {
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_SEED } else { seed },
        }
    }

    pub fn seed(&mut self, seed: u32) {
        *self = Self::new(seed);
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance one step and return the new state.
    pub fn next(&mut self) -> u32 {
        if self.state == 0 {
            self.state = DEFAULT_SEED;
        }
        let lsb = self.state & 1;
        self.state >>= 1;
        if lsb != 0 {
            self.state ^= FEEDBACK_MASK;
        }
        self.state
    }

    pub fn next_button(&mut self) -> Button {
        match self.next() & 0b11 {
            0 => Button::S1,
            1 => Button::S2,
            2 => Button::S3,
            _ => Button::S4,
        }
    }

    /// Fold `entropy` into `seed` and step once, giving a fresh non-zero seed.
    pub fn mix(seed: u32, entropy: u32) -> u32 {
        let mut lfsr = Self::new(seed ^ entropy);
        lfsr.next()
    }
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}
