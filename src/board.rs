//! Capability interface between the game core and the board adapters
//!
//! The core only ever calls outward through these traits. Register access,
//! interrupt handling and text transport all live behind them.

use crate::report::Report;

/// One of the four coloured game buttons.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Button {
    S1 = 1,
    S2 = 2,
    S3 = 3,
    S4 = 4,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::S1, Button::S2, Button::S3, Button::S4];

    /// Look up a button by its 1-based identifier.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Button::S1),
            2 => Some(Button::S2),
            3 => Some(Button::S3),
            4 => Some(Button::S4),
            _ => None,
        }
    }

    /// Lowest set button in a `read_buttons` style mask (S1 = bit 0).
    pub fn from_mask(mask: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|button| mask & button.mask() != 0)
    }

    pub fn id(self) -> u8 {
        self as u8
    }

    /// Zero-based index, used for tables.
    pub fn index(self) -> usize {
        self as usize - 1
    }

    pub fn mask(self) -> u8 {
        1 << self.index()
    }

    pub fn colour(self) -> &'static str {
        match self {
            Button::S1 => "RED",
            Button::S2 => "GREEN",
            Button::S3 => "BLUE",
            Button::S4 => "YELLOW",
        }
    }
}

/// What the display should currently show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Button(Button),
    Level(u8),
    Idle(u8),
    Success,
    Failure,
    Pattern(u8),
}

impl Frame {
    /// Bit pattern for a bank of LEDs, one bit per LED.
    pub fn led_pattern(self) -> u8 {
        match self {
            Frame::Button(button) => button.mask(),
            // Binary level readout on the low nibble
            Frame::Level(level) => level & 0x0F,
            // Knight Rider chase 0-1-2-3-2-1
            Frame::Idle(frame) => match frame % 6 {
                0 => 0b0001,
                1 | 5 => 0b0010,
                2 | 4 => 0b0100,
                _ => 0b1000,
            },
            Frame::Success => 0b1111,
            Frame::Failure => 0b1001,
            Frame::Pattern(bits) => bits & 0x0F,
        }
    }
}

/// Sounds the buzzer can make.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tone {
    Button(Button),
    Success,
}

pub trait Display {
    fn show(&mut self, frame: Frame);
    fn clear(&mut self);
}

pub trait Buzzer {
    /// Start a continuous tone; it keeps sounding until [`Buzzer::silence`].
    fn play(&mut self, tone: Tone, octave: i8);
    fn silence(&mut self);
}

pub trait Console {
    fn report(&mut self, report: &Report<'_>);
}

/// Everything the game needs from the hardware.
pub trait Board: Display + Buzzer + Console {}

impl<T: Display + Buzzer + Console> Board for T {}
