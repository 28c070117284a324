//! Portable peripheral drivers written against `embedded-hal` 0.2
//!
//! Each driver implements one capability trait from [`crate::board`].
//! [`BoardIo`] bundles a display, a buzzer and a console into one [`Board`].
//!
//! [`Board`]: crate::board::Board

pub mod button_pad;
pub mod buzzer;
pub mod led_bank;
pub mod serial_console;

pub use button_pad::ButtonPad;
pub use buzzer::{PiezoBuzzer, ToneOutput};
pub use led_bank::LedBank;
pub use serial_console::SerialConsole;

use crate::board::{Buzzer, Console, Display, Frame, Tone};
use crate::report::Report;

pub struct BoardIo<D, B, C> {
    pub display: D,
    pub buzzer: B,
    pub console: C,
}

impl<D, B, C> BoardIo<D, B, C> {
    pub fn new(display: D, buzzer: B, console: C) -> Self {
        Self {
            display,
            buzzer,
            console,
        }
    }
}

impl<D: Display, B, C> Display for BoardIo<D, B, C> {
    fn show(&mut self, frame: Frame) {
        self.display.show(frame)
    }

    fn clear(&mut self) {
        self.display.clear()
    }
}

impl<D, B: Buzzer, C> Buzzer for BoardIo<D, B, C> {
    fn play(&mut self, tone: Tone, octave: i8) {
        self.buzzer.play(tone, octave)
    }

    fn silence(&mut self) {
        self.buzzer.silence()
    }
}

impl<D, B, C: Console> Console for BoardIo<D, B, C> {
    fn report(&mut self, report: &Report<'_>) {
        self.console.report(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Button;
    use crate::game::{Phase, Simon};
    use crate::testing::RecordingBoard;
    use embedded_hal_mock::serial::{Mock as SerialMock, Transaction};

    #[test]
    fn game_runs_on_composed_board() {
        let mut uart = SerialMock::new(&[Transaction::write_many(b"READY\r\n")]);
        let mut io = BoardIo::new(
            RecordingBoard::new(),
            RecordingBoard::new(),
            SerialConsole::new(uart.clone()),
        );

        let mut game = Simon::default();
        game.reset(&mut io);
        assert_eq!(game.phase(), Phase::Attract);
        assert_eq!(io.display.frame(), Some(Frame::Idle(0)));
        assert_eq!(io.buzzer.tone(), None);
        uart.done();

        // Display-only calls never reach the buzzer
        io.show(Frame::Button(Button::S4));
        assert!(io.buzzer.frame().is_none());
    }
}
