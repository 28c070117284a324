//! Host build of the Simon game
//!
//! Reads one command per line from stdin (see `help`) and prints the game's
//! reports to stdout. Time only advances when a line asks for it, so sessions
//! are reproducible when a seed is given.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use ufmt::uWrite;

use simon_firmware::board::{Buzzer, Console, Display, Frame, Tone};
use simon_firmware::console::{self, ConsoleCommand, RUN_LIMIT_TICKS};
use simon_firmware::input::{Command, Input, CR};
use simon_firmware::{tone, GameConfig, Report, Simon};

const LINE_HELP: &str = "\
lines: <empty>|run  tick [n]  s1..s4  cmd <c>  type <text>  name <text>
       pot <0-1023>  speed <i>  seed <hex>  start  reset  log  help  quit";

#[derive(Parser)]
#[command(name = "simon_console")]
#[command(version, about = "Play the Simon game core from a terminal", long_about = None)]
struct Cli {
    /// Seed for the first game, in hex
    #[arg(long, value_parser = parse_seed)]
    seed: Option<u32>,

    /// Initial speed index, 0 is fastest
    #[arg(long)]
    speed: Option<u8>,

    /// Octave shift applied to every tone
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    octave: i8,

    /// End the game as a win after this many rounds
    #[arg(long)]
    max_level: Option<u8>,

    /// Also print display and buzzer activity
    #[arg(short, long)]
    verbose: bool,
}

fn parse_seed(text: &str) -> Result<u32, String> {
    console::parse_hex(text).map_err(|err| err.describe().to_owned())
}

/// `ufmt` sink over a std writer.
struct Out<W: Write>(W);

impl<W: Write> uWrite for Out<W> {
    type Error = io::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.write_all(s.as_bytes())
    }
}

/// Board whose display, buzzer and console all print to one writer.
///
/// The capability traits cannot fail, so the first I/O error is parked and
/// surfaced by [`HostBoard::check`].
struct HostBoard<W: Write> {
    out: Out<W>,
    verbose: bool,
    error: Option<io::Error>,
}

impl<W: Write> HostBoard<W> {
    fn new(out: W, verbose: bool) -> Self {
        Self {
            out: Out(out),
            verbose,
            error: None,
        }
    }

    fn keep(&mut self, result: io::Result<()>) {
        if let Err(err) = result {
            self.error.get_or_insert(err);
        }
    }

    fn trace(&mut self, args: std::fmt::Arguments<'_>) {
        if self.verbose {
            let result = writeln!(self.out.0, "  {}", args);
            self.keep(result);
        }
    }

    fn diagnostic(&mut self, problem: &str, line: &str) {
        let result = writeln!(self.out.0, "? {}: {:?}", problem, line);
        self.keep(result);
    }

    fn check(&mut self) -> Result<()> {
        let result = self.out.0.flush();
        self.keep(result);
        match self.error.take() {
            Some(err) => Err(err).context("writing to stdout"),
            None => Ok(()),
        }
    }
}

impl<W: Write> Display for HostBoard<W> {
    fn show(&mut self, frame: Frame) {
        let pattern = frame.led_pattern();
        self.trace(format_args!("leds {:04b} {:?}", pattern, frame));
    }

    fn clear(&mut self) {
        self.trace(format_args!("leds 0000"));
    }
}

impl<W: Write> Buzzer for HostBoard<W> {
    fn play(&mut self, tone: Tone, octave: i8) {
        let freq = tone::frequency(tone, octave);
        self.trace(format_args!("tone {}Hz {:?}", freq, tone));
    }

    fn silence(&mut self) {
        self.trace(format_args!("tone off"));
    }
}

impl<W: Write> Console for HostBoard<W> {
    fn report(&mut self, report: &Report<'_>) {
        let result = report.write_to(&mut self.out);
        self.keep(result);
    }
}

fn execute<W: Write>(game: &mut Simon, board: &mut HostBoard<W>, command: ConsoleCommand<'_>) {
    match command {
        ConsoleCommand::Run => {
            game.run(board, RUN_LIMIT_TICKS);
        }
        ConsoleCommand::Tick(ticks) => {
            for _ in 0..ticks {
                game.tick(board);
            }
        }
        ConsoleCommand::Press(button) => game.handle(Input::Press(button), board),
        ConsoleCommand::Key(key) => game.handle(Input::Char(key), board),
        ConsoleCommand::Type(text) => {
            for byte in text.bytes() {
                game.handle(Input::Char(byte), board);
            }
            game.handle(Input::Char(CR), board);
        }
        ConsoleCommand::Name(text) => game.handle(Input::Name(text), board),
        ConsoleCommand::Pot(sample) => game.handle(Input::Analog(sample), board),
        ConsoleCommand::Speed(index) => game.handle(Input::Speed(index), board),
        ConsoleCommand::Seed(seed) => game.handle(Input::Seed(seed), board),
        ConsoleCommand::Start => game.handle(Input::Start, board),
        ConsoleCommand::Reset => game.handle(Input::Reset, board),
        ConsoleCommand::Log => game.handle(Input::Command(Command::DumpLog), board),
        ConsoleCommand::Help => {
            game.handle(Input::Command(Command::Help), board);
            let result = writeln!(board.out.0, "{}", LINE_HELP);
            board.keep(result);
        }
        // Handled by the read loop
        ConsoleCommand::Quit => {}
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GameConfig::DEFAULT;
    if let Some(speed) = cli.speed {
        config.default_speed = speed;
    }
    if let Some(max_level) = cli.max_level {
        config.max_level = max_level;
    }

    let stdout = io::stdout();
    let mut board = HostBoard::new(stdout.lock(), cli.verbose);
    let mut game = Simon::new(config);
    game.reset(&mut board);

    let shift = if cli.octave < 0 {
        Command::OctaveDown
    } else {
        Command::OctaveUp
    };
    for _ in 0..cli.octave.unsigned_abs() {
        game.handle(Input::Command(shift), &mut board);
    }
    if let Some(seed) = cli.seed {
        game.handle(Input::Seed(seed), &mut board);
    }
    board.check()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match console::parse_line(&line) {
            Ok(ConsoleCommand::Quit) => break,
            Ok(command) => execute(&mut game, &mut board, command),
            Err(err) => board.diagnostic(err.describe(), &line),
        }
        board.check()?;
    }

    board.check()
}
