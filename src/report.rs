//! Structured events the game emits towards the console
//!
//! Adapters decide where the text goes; the wording lives here so the UART
//! firmware and the host console print the same thing.

use ufmt::{uDisplay, uWrite, Formatter};

use crate::board::Button;
use crate::highscore::HighScoreTable;
use crate::logger::LogEntry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Report<'a> {
    Ready,
    Playback { step: u8, of: u8, button: Button },
    YourTurn { level: u8 },
    Correct { step: u8, of: u8 },
    Success { level: u8 },
    GameOver { score: u16 },
    Victory { score: u16 },
    NamePrompt,
    NameEcho(char),
    NameErase,
    HighScoreSaved { score: u16 },
    HighScores(&'a HighScoreTable),
    HighScoresCleared,
    Delay { ms: u16, index: u8 },
    Octave(i8),
    Score(u16),
    Seed(u32),
    Log(&'a LogEntry),
    Help,
}

const HELP: &str = "1-4/hjkl press  n new game  r reset  q/w octave  -/+ speed\r\n\
d delay  p score  s scores  x clear scores  v log  #XXXXXXXX seed";

impl Report<'_> {
    /// Whether the rendered text is a whole line. Name echo and erase are
    /// written inline while the player types.
    pub fn is_line(&self) -> bool {
        !matches!(self, Report::NameEcho(_) | Report::NameErase)
    }

    /// Render the report followed by CRLF when it is a line.
    pub fn write_to<W: uWrite + ?Sized>(&self, w: &mut W) -> Result<(), W::Error> {
        ufmt::uwrite!(w, "{}", self)?;
        // The table already ends every row
        if self.is_line() && !matches!(self, Report::HighScores(_)) {
            w.write_str("\r\n")?;
        }
        Ok(())
    }
}

impl uDisplay for Report<'_> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match *self {
            Report::Ready => f.write_str("READY"),
            Report::Playback { step, of, button } => {
                ufmt::uwrite!(f, "PLAY {}/{} {}", step, of, button.colour())
            }
            Report::YourTurn { level } => ufmt::uwrite!(f, "INPUT {}", level),
            Report::Correct { step, of } => ufmt::uwrite!(f, "OK {}/{}", step, of),
            Report::Success { level } => ufmt::uwrite!(f, "SUCCESS {}", level),
            Report::GameOver { score } => ufmt::uwrite!(f, "GAME OVER {}", score),
            Report::Victory { score } => ufmt::uwrite!(f, "VICTORY {}", score),
            Report::NamePrompt => f.write_str("Enter name:"),
            Report::NameEcho(c) => f.write_char(c),
            Report::NameErase => f.write_str("\x08 \x08"),
            Report::HighScoreSaved { score } => ufmt::uwrite!(f, "SAVED {}", score),
            Report::HighScores(table) => ufmt::uwrite!(f, "{}", table),
            Report::HighScoresCleared => f.write_str("SCORES CLEARED"),
            Report::Delay { ms, index } => ufmt::uwrite!(f, "DELAY {} ({})", ms, index),
            Report::Octave(octave) => {
                f.write_str("OCTAVE ")?;
                if octave >= 0 {
                    f.write_char('+')?;
                }
                ufmt::uwrite!(f, "{}", octave)
            }
            Report::Score(score) => ufmt::uwrite!(f, "SCORE {}", score),
            Report::Seed(seed) => {
                f.write_str("SEED 0x")?;
                write_hex_u32(f, seed)
            }
            Report::Log(entry) => ufmt::uwrite!(f, "{}", entry),
            Report::Help => f.write_str(HELP),
        }
    }
}

fn write_hex_u32<W>(f: &mut Formatter<'_, W>, value: u32) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    const HEX_CHARS: [u8; 16] = *b"0123456789ABCDEF";
    for shift in (0..8).rev() {
        let nibble = (value >> (shift * 4)) & 0xF;
        f.write_char(HEX_CHARS[nibble as usize] as char)?;
    }
    Ok(())
}
