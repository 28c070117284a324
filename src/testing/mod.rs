//! Board double for exercising the game without hardware
//!
//! [`RecordingBoard`] implements every capability trait, remembers the
//! current display frame and tone, and keeps the most recent calls and
//! rendered report lines. It is `no_std` and allocation-free so the same
//! recorder serves unit tests and the integration suite.

use heapless::{Deque, String};

use crate::board::{Buzzer, Console, Display, Frame, Tone};
use crate::report::Report;

pub const CALL_CAPACITY: usize = 256;
pub const LINE_CAPACITY: usize = 64;
pub const LINE_LEN: usize = 160;

pub type Line = String<LINE_LEN>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Call {
    Show(Frame),
    Clear,
    Play(Tone, i8),
    Silence,
    Report,
}

pub struct RecordingBoard {
    calls: Deque<Call, CALL_CAPACITY>,
    lines: Deque<Line, LINE_CAPACITY>,
    frame: Option<Frame>,
    tone: Option<(Tone, i8)>,
}

impl RecordingBoard {
    pub const fn new() -> Self {
        Self {
            calls: Deque::new(),
            lines: Deque::new(),
            frame: None,
            tone: None,
        }
    }

    /// Forget recorded calls and lines; the current frame and tone stay.
    pub fn forget(&mut self) {
        self.calls.clear();
        self.lines.clear();
    }

    pub fn calls(&self) -> impl Iterator<Item = &Call> {
        self.calls.iter()
    }

    /// Rendered report text, oldest first. Lines keep their CRLF.
    pub fn reports(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.as_str())
    }

    pub fn last_report(&self) -> Option<&str> {
        self.lines.back().map(|line| line.as_str())
    }

    /// Frame on the display, `None` after a clear.
    pub fn frame(&self) -> Option<Frame> {
        self.frame
    }

    /// Tone sounding right now.
    pub fn tone(&self) -> Option<(Tone, i8)> {
        self.tone
    }

    /// Number of tones started since the last [`RecordingBoard::forget`].
    pub fn tones_played(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Play(..)))
            .count()
    }

    fn record(&mut self, call: Call) {
        if self.calls.is_full() {
            self.calls.pop_front();
        }
        let _ = self.calls.push_back(call);
    }
}

impl Default for RecordingBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for RecordingBoard {
    fn show(&mut self, frame: Frame) {
        self.frame = Some(frame);
        self.record(Call::Show(frame));
    }

    fn clear(&mut self) {
        self.frame = None;
        self.record(Call::Clear);
    }
}

impl Buzzer for RecordingBoard {
    fn play(&mut self, tone: Tone, octave: i8) {
        self.tone = Some((tone, octave));
        self.record(Call::Play(tone, octave));
    }

    fn silence(&mut self) {
        self.tone = None;
        self.record(Call::Silence);
    }
}

impl Console for RecordingBoard {
    fn report(&mut self, report: &Report<'_>) {
        let mut line = Line::new();
        // Overlong text is kept truncated
        let _ = report.write_to(&mut line);

        if self.lines.is_full() {
            self.lines.pop_front();
        }
        let _ = self.lines.push_back(line);
        self.record(Call::Report);
    }
}
