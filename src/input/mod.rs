//! Translation of raw input into game events
//!
//! Debounced button edges, UART bytes and potentiometer samples all end up as
//! an [`Input`] handed to [`crate::game::Simon::handle`].

pub mod analog;
pub mod debounce;

pub use analog::PotSampler;
pub use debounce::{ButtonDebouncer, ButtonEvent};

use crate::board::Button;

pub const BACKSPACE: u8 = 0x08;
pub const DELETE: u8 = 0x7F;
pub const ESCAPE: u8 = 0x1B;
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';

/// One event delivered to the state machine between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input<'a> {
    /// Debounced press of a physical button
    Press(Button),
    Start,
    Reset,
    /// Raw byte from the serial console
    Char(u8),
    /// Already decoded command, accepted in every phase
    Command(Command),
    /// Whole name submitted at once
    Name(&'a str),
    /// Filtered potentiometer reading, 0..=1023
    Analog(u16),
    Speed(u8),
    Seed(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Press(Button),
    NewGame,
    Reset,
    OctaveDown,
    OctaveUp,
    Faster,
    Slower,
    ShowDelay,
    ShowScore,
    ShowScores,
    ClearScores,
    DumpLog,
    Help,
    BeginSeed,
}

/// Key map used outside name entry.
pub fn decode_char(byte: u8) -> Option<Command> {
    let command = match byte {
        b'1' | b'h' => Command::Press(Button::S1),
        b'2' | b'j' => Command::Press(Button::S2),
        b'3' | b'k' => Command::Press(Button::S3),
        b'4' | b'l' => Command::Press(Button::S4),
        b'n' | b'N' => Command::NewGame,
        b'r' | b'R' | ESCAPE => Command::Reset,
        b'q' => Command::OctaveDown,
        b'w' => Command::OctaveUp,
        b'-' => Command::Faster,
        b'+' | b'=' => Command::Slower,
        b'd' => Command::ShowDelay,
        b'p' => Command::ShowScore,
        b's' => Command::ShowScores,
        b'x' => Command::ClearScores,
        b'v' => Command::DumpLog,
        b'?' => Command::Help,
        b'#' => Command::BeginSeed,
        _ => return None,
    };
    Some(command)
}

pub fn is_enter(byte: u8) -> bool {
    byte == CR || byte == LF
}

pub fn is_backspace(byte: u8) -> bool {
    byte == BACKSPACE || byte == DELETE
}

pub fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Outcome of feeding one byte to a [`SeedEntry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedStep {
    Pending,
    Done(u32),
    Cancelled,
}

/// `#` followed by up to eight hex digits, Enter ends early.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedEntry {
    value: u32,
    digits: u8,
    active: bool,
}

impl SeedEntry {
    pub const MAX_DIGITS: u8 = 8;

    pub const fn new() -> Self {
        Self {
            value: 0,
            digits: 0,
            active: false,
        }
    }

    pub fn begin(&mut self) {
        *self = Self {
            active: true,
            ..Self::new()
        };
    }

    pub fn cancel(&mut self) {
        *self = Self::new();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Any byte that is neither a hex digit nor Enter aborts the entry.
    /// Enter with no digits typed aborts as well.
    pub fn push(&mut self, byte: u8) -> SeedStep {
        if !self.active {
            return SeedStep::Cancelled;
        }

        if is_enter(byte) {
            let step = if self.digits == 0 {
                SeedStep::Cancelled
            } else {
                SeedStep::Done(self.value)
            };
            self.cancel();
            return step;
        }

        match hex_value(byte) {
            Some(nibble) => {
                self.value = (self.value << 4) | nibble as u32;
                self.digits += 1;
                if self.digits == Self::MAX_DIGITS {
                    let value = self.value;
                    self.cancel();
                    SeedStep::Done(value)
                } else {
                    SeedStep::Pending
                }
            }
            None => {
                self.cancel();
                SeedStep::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vi_keys_alias_the_digits() {
        for (digit, vi) in [(b'1', b'h'), (b'2', b'j'), (b'3', b'k'), (b'4', b'l')] {
            assert_eq!(decode_char(digit), decode_char(vi));
            assert!(matches!(decode_char(digit), Some(Command::Press(_))));
        }
    }

    #[test]
    fn unknown_bytes_decode_to_nothing() {
        for byte in [b'z', b'0', b'5', 0x00, 0xFF, b' '] {
            assert_eq!(decode_char(byte), None);
        }
    }

    #[test]
    fn escape_resets() {
        assert_eq!(decode_char(ESCAPE), Some(Command::Reset));
        assert_eq!(decode_char(b'R'), Some(Command::Reset));
    }

    #[test]
    fn eight_digits_complete_the_seed() {
        let mut entry = SeedEntry::new();
        entry.begin();
        let mut last = SeedStep::Pending;
        for byte in b"DEADbeef" {
            last = entry.push(*byte);
        }
        assert_eq!(last, SeedStep::Done(0xDEAD_BEEF));
        assert!(!entry.is_active());
    }

    #[test]
    fn enter_ends_a_short_seed() {
        let mut entry = SeedEntry::new();
        entry.begin();
        assert_eq!(entry.push(b'1'), SeedStep::Pending);
        assert_eq!(entry.push(b'\r'), SeedStep::Done(1));
    }

    #[test]
    fn stray_bytes_abort() {
        let mut entry = SeedEntry::new();
        entry.begin();
        assert_eq!(entry.push(b'\n'), SeedStep::Cancelled);

        entry.begin();
        entry.push(b'a');
        assert_eq!(entry.push(b'g'), SeedStep::Cancelled);
        assert!(!entry.is_active());
    }
}
