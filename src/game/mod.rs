//! Simon game state machine
//!
//! [`Simon`] owns every piece of game state. It is driven by exactly two
//! entry points: [`Simon::tick`] once per millisecond and [`Simon::handle`]
//! for each discrete input between ticks. All side effects go out through a
//! [`Board`]; nothing is ever read back from it.

mod name_entry;

pub use name_entry::NameBuffer;

use heapless::Vec;

use crate::board::{Board, Button, Frame, Tone};
use crate::config::{GameConfig, LOG_CAPACITY, MAX_SEQUENCE};
use crate::highscore::HighScoreTable;
use crate::input::{self, Command, Input, SeedEntry, SeedStep};
use crate::lfsr::Lfsr;
use crate::logger::Logger;
use crate::report::Report;
use crate::timing::{SpeedControl, ToneTiming};

/// Frames in one pass of the attract animation.
const IDLE_FRAMES: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Attract = 0,
    Playback = 1,
    AwaitInput = 2,
    RoundComplete = 3,
    Failure = 4,
    NameEntry = 5,
}

pub struct Simon {
    config: GameConfig,
    phase: Phase,
    sequence: Vec<Button, MAX_SEQUENCE>,
    playback_index: usize,
    input_index: usize,
    // Playback step currently sounding
    tone_on: bool,
    rng: Lfsr,
    seed: u32,
    pending_seed: Option<u32>,
    speed: SpeedControl,
    timing: ToneTiming,
    octave: i8,
    last_score: u16,
    highscores: HighScoreTable,
    name: NameBuffer,
    countdown: u16,
    // Button feedback in AwaitInput, success tone in RoundComplete
    tone_left: u16,
    name_timeout: u16,
    idle_ticks: u16,
    idle_frame: u8,
    uptime_ms: u32,
    seed_entry: SeedEntry,
    log: Logger<LOG_CAPACITY>,
}

impl Simon {
    /// A session in Attract. Nothing is announced until [`Simon::reset`].
    pub fn new(config: GameConfig) -> Self {
        let config = config.sanitized();
        let speed = SpeedControl::new(&config);
        let mut log = Logger::new();
        log.log_system(0, "init", config.default_seed);

        Self {
            config,
            phase: Phase::Attract,
            sequence: Vec::new(),
            playback_index: 0,
            input_index: 0,
            tone_on: false,
            rng: Lfsr::new(config.default_seed),
            seed: config.default_seed,
            pending_seed: None,
            timing: speed.timing(),
            speed,
            octave: 0,
            last_score: 0,
            highscores: HighScoreTable::new(),
            name: NameBuffer::new(),
            countdown: 0,
            tone_left: 0,
            name_timeout: 0,
            idle_ticks: 0,
            idle_frame: 0,
            uptime_ms: 0,
            seed_entry: SeedEntry::new(),
            log,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> usize {
        self.sequence.len()
    }

    pub fn sequence(&self) -> &[Button] {
        &self.sequence
    }

    pub fn playback_index(&self) -> usize {
        self.playback_index
    }

    pub fn input_index(&self) -> usize {
        self.input_index
    }

    pub fn last_score(&self) -> u16 {
        self.last_score
    }

    pub fn highscores(&self) -> &HighScoreTable {
        &self.highscores
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    pub fn speed(&self) -> &SpeedControl {
        &self.speed
    }

    /// On/off split used by the current round.
    pub fn timing(&self) -> ToneTiming {
        self.timing
    }

    /// Base seed of the game in progress (or of the last one).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn pending_seed(&self) -> Option<u32> {
        self.pending_seed
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn uptime_ms(&self) -> u32 {
        self.uptime_ms
    }

    pub fn logger(&self) -> &Logger<LOG_CAPACITY> {
        &self.log
    }

    /// True while nothing will happen until the player acts.
    pub fn awaiting_player(&self) -> bool {
        matches!(
            self.phase,
            Phase::Attract | Phase::AwaitInput | Phase::NameEntry
        )
    }

    /// Speed changes are staged while a round is on screen.
    fn round_locked(&self) -> bool {
        matches!(self.phase, Phase::Playback | Phase::AwaitInput)
    }

    /// Back to Attract from anywhere. High scores, the last score, the octave
    /// and any requested seed survive.
    pub fn reset(&mut self, io: &mut impl Board) {
        self.sequence.clear();
        self.playback_index = 0;
        self.input_index = 0;
        self.tone_on = false;
        self.countdown = 0;
        self.tone_left = 0;
        self.name_timeout = 0;
        self.name.clear();
        self.apply_pending_speed();

        self.log.log_system(self.uptime_ms, "reset", self.phase as u32);
        self.enter_attract(io);
    }

    /// Advance every timer by one millisecond.
    pub fn tick(&mut self, io: &mut impl Board) {
        self.uptime_ms = self.uptime_ms.wrapping_add(1);

        match self.phase {
            Phase::Attract => {
                self.idle_ticks += 1;
                if self.idle_ticks >= self.config.idle_frame_ms {
                    self.idle_ticks = 0;
                    self.idle_frame = (self.idle_frame + 1) % IDLE_FRAMES;
                    io.show(Frame::Idle(self.idle_frame));
                }
            }
            Phase::Playback => {
                if self.expired() {
                    self.playback_step(io);
                }
            }
            Phase::AwaitInput => {
                if self.tone_expired() {
                    io.silence();
                    io.show(Frame::Level(self.level() as u8));
                }
            }
            Phase::RoundComplete => {
                if self.tone_expired() {
                    io.silence();
                }
                if self.expired() {
                    self.round_finished(io);
                }
            }
            Phase::Failure => {
                if self.expired() {
                    self.finish_game(io);
                }
            }
            Phase::NameEntry => {
                self.name_timeout = self.name_timeout.saturating_sub(1);
                if self.name_timeout == 0 {
                    self.log.log_game(self.uptime_ms, "name timeout", self.name.len() as u32);
                    self.commit_name(io);
                }
            }
        }
    }

    /// Tick until the game waits for the player, at most `max_ticks` times.
    /// Returns the number of ticks run.
    pub fn run(&mut self, io: &mut impl Board, max_ticks: u32) -> u32 {
        let mut ticks = 0;
        while ticks < max_ticks && !self.awaiting_player() {
            self.tick(io);
            ticks += 1;
        }
        ticks
    }

    /// Deliver one input event. Events that make no sense in the current
    /// phase are dropped.
    pub fn handle(&mut self, input: Input<'_>, io: &mut impl Board) {
        match input {
            Input::Reset => self.reset(io),
            Input::Start => {
                if self.phase == Phase::NameEntry {
                    self.ignore(1);
                } else {
                    self.start_game(io);
                }
            }
            Input::Press(button) => self.press(button, io),
            Input::Char(byte) => self.handle_char(byte, io),
            Input::Command(command) => self.command(command, io),
            Input::Name(text) => {
                if self.phase == Phase::NameEntry {
                    self.name.set(text);
                    self.commit_name(io);
                } else {
                    self.ignore(2);
                }
            }
            Input::Analog(sample) => {
                let locked = self.round_locked();
                let before = self.speed.target();
                self.speed.set_sample(&self.config, sample, locked);
                if self.speed.target() != before {
                    self.speed_changed(io);
                }
            }
            Input::Speed(index) => {
                let locked = self.round_locked();
                self.speed.set_index(&self.config, index, locked);
                self.speed_changed(io);
            }
            Input::Seed(seed) => self.request_seed(seed, io),
        }
    }

    fn handle_char(&mut self, byte: u8, io: &mut impl Board) {
        if self.phase == Phase::NameEntry {
            self.name_key(byte, io);
            return;
        }

        if self.seed_entry.is_active() {
            match self.seed_entry.push(byte) {
                SeedStep::Pending => {}
                SeedStep::Done(seed) => self.request_seed(seed, io),
                SeedStep::Cancelled => self.ignore(byte as u32),
            }
            return;
        }

        match input::decode_char(byte) {
            Some(command) => self.command(command, io),
            None => self.ignore(byte as u32),
        }
    }

    fn command(&mut self, command: Command, io: &mut impl Board) {
        match command {
            Command::Press(button) => self.press(button, io),
            Command::NewGame => self.handle(Input::Start, io),
            Command::Reset => self.reset(io),
            Command::OctaveDown => self.shift_octave(-1, io),
            Command::OctaveUp => self.shift_octave(1, io),
            Command::Faster => self.step_speed(-1, io),
            Command::Slower => self.step_speed(1, io),
            Command::ShowDelay => io.report(&Report::Delay {
                ms: self.speed.delay_ms(),
                index: self.speed.index(),
            }),
            Command::ShowScore => io.report(&Report::Score(self.last_score)),
            Command::ShowScores => io.report(&Report::HighScores(&self.highscores)),
            Command::ClearScores => {
                self.highscores.reset();
                self.log.log_game(self.uptime_ms, "scores cleared", 0);
                io.report(&Report::HighScoresCleared);
            }
            Command::DumpLog => {
                self.log.drain(|entry| io.report(&Report::Log(entry)));
            }
            Command::Help => io.report(&Report::Help),
            Command::BeginSeed => self.seed_entry.begin(),
        }
    }

    fn press(&mut self, button: Button, io: &mut impl Board) {
        match self.phase {
            Phase::Attract => self.start_game(io),
            Phase::AwaitInput => self.check_press(button, io),
            _ => self.ignore(button.id() as u32),
        }
    }

    fn check_press(&mut self, button: Button, io: &mut impl Board) {
        let level = self.level();
        let Some(&expected) = self.sequence.get(self.input_index) else {
            return;
        };

        if button != expected {
            self.log.log_game(self.uptime_ms, "wrong", button.id() as u32);
            self.last_score = level.saturating_sub(1) as u16;
            self.enter_failure(io);
            return;
        }

        self.input_index += 1;
        io.show(Frame::Button(button));
        io.play(Tone::Button(button), self.octave);
        self.tone_left = self.timing.on_ms;
        io.report(&Report::Correct {
            step: self.input_index as u8,
            of: level as u8,
        });

        if self.input_index == level {
            self.enter_round_complete(io);
        }
    }

    fn start_game(&mut self, io: &mut impl Board) {
        self.seed = match self.pending_seed.take() {
            Some(seed) => seed,
            None => {
                let entropy = ((self.speed.delay_ms() as u32) << 4)
                    ^ self.uptime_ms
                    ^ self.idle_ticks as u32;
                Lfsr::mix(self.seed, entropy)
            }
        };
        self.rng.seed(self.seed);
        self.sequence.clear();
        self.seed_entry.cancel();
        self.last_score = 0;
        self.tone_left = 0;
        self.log.log_game(self.uptime_ms, "start", self.seed);

        self.enter_playback(io);
    }

    fn enter_attract(&mut self, io: &mut impl Board) {
        self.set_phase(Phase::Attract);
        self.idle_ticks = 0;
        self.idle_frame = 0;
        self.seed_entry.cancel();
        io.silence();
        io.clear();
        io.show(Frame::Idle(0));
        io.report(&Report::Ready);
    }

    fn enter_playback(&mut self, io: &mut impl Board) {
        self.apply_pending_speed();

        if self.sequence.push(self.rng.next_button()).is_err() {
            // Capacity reached; treat as a win rather than drop the round
            self.log.log_error(self.uptime_ms, "sequence full", MAX_SEQUENCE as u32);
            self.victory(io);
            return;
        }

        self.set_phase(Phase::Playback);
        self.timing = self.speed.timing();
        self.playback_index = 0;
        self.input_index = 0;
        self.tone_on = false;
        self.countdown = self.timing.off_ms;
        io.silence();
        io.clear();
    }

    /// One countdown expiry during playback: sound the next step, silence
    /// the current one, or hand over to the player after the last gap.
    fn playback_step(&mut self, io: &mut impl Board) {
        if self.tone_on {
            io.silence();
            io.clear();
            self.tone_on = false;
            self.playback_index += 1;
            self.countdown = self.timing.off_ms;
            return;
        }

        let level = self.level();
        match self.sequence.get(self.playback_index) {
            Some(&button) => {
                io.show(Frame::Button(button));
                io.play(Tone::Button(button), self.octave);
                io.report(&Report::Playback {
                    step: self.playback_index as u8 + 1,
                    of: level as u8,
                    button,
                });
                self.tone_on = true;
                self.countdown = self.timing.on_ms;
            }
            None => self.enter_await_input(io),
        }
    }

    fn enter_await_input(&mut self, io: &mut impl Board) {
        self.set_phase(Phase::AwaitInput);
        self.input_index = 0;
        self.tone_left = 0;
        self.countdown = 0;
        io.show(Frame::Level(self.level() as u8));
        io.report(&Report::YourTurn {
            level: self.level() as u8,
        });
    }

    fn enter_round_complete(&mut self, io: &mut impl Board) {
        self.set_phase(Phase::RoundComplete);
        self.last_score = self.level() as u16;
        self.countdown = self.config.round_pause_ms;
        self.tone_left = self.config.success_tone_ms;
        io.show(Frame::Success);
        if self.tone_left > 0 {
            io.play(Tone::Success, self.octave);
        } else {
            io.silence();
        }
        io.report(&Report::Success {
            level: self.level() as u8,
        });
    }

    fn round_finished(&mut self, io: &mut impl Board) {
        io.silence();
        if self.level() >= self.config.max_level as usize {
            self.victory(io);
        } else {
            self.enter_playback(io);
        }
    }

    fn victory(&mut self, io: &mut impl Board) {
        self.last_score = self.level() as u16;
        self.log.log_game(self.uptime_ms, "victory", self.last_score as u32);
        io.report(&Report::Victory {
            score: self.last_score,
        });
        self.finish_game(io);
    }

    fn enter_failure(&mut self, io: &mut impl Board) {
        self.set_phase(Phase::Failure);
        self.countdown = self.config.failure_pause_ms;
        self.tone_left = 0;
        io.silence();
        io.show(Frame::Failure);
        io.report(&Report::GameOver {
            score: self.last_score,
        });
    }

    /// End of a game, won or lost.
    fn finish_game(&mut self, io: &mut impl Board) {
        self.apply_pending_speed();
        self.seed_entry.cancel();
        self.sequence.clear();
        self.playback_index = 0;
        self.input_index = 0;
        self.countdown = 0;
        self.tone_left = 0;

        if self.highscores.qualifies(self.last_score) {
            self.set_phase(Phase::NameEntry);
            self.name.clear();
            self.name_timeout = self.config.name_timeout_ms;
            io.silence();
            io.show(Frame::Level(self.last_score.min(u8::MAX as u16) as u8));
            io.report(&Report::NamePrompt);
        } else {
            self.enter_attract(io);
        }
    }

    fn name_key(&mut self, byte: u8, io: &mut impl Board) {
        self.name_timeout = self.config.name_timeout_ms;

        if byte == input::ESCAPE {
            self.reset(io);
        } else if input::is_enter(byte) {
            self.commit_name(io);
        } else if input::is_backspace(byte) {
            if self.name.pop() {
                io.report(&Report::NameErase);
            }
        } else if let Some(c) = self.name.push(byte) {
            io.report(&Report::NameEcho(c));
        } else {
            self.ignore(byte as u32);
        }
    }

    fn commit_name(&mut self, io: &mut impl Board) {
        let score = self.last_score;
        if self.highscores.try_insert(self.name.committed(), score) {
            self.log.log_game(self.uptime_ms, "high score", score as u32);
            io.report(&Report::HighScoreSaved { score });
            io.report(&Report::HighScores(&self.highscores));
        }
        self.name.clear();
        self.name_timeout = 0;
        self.enter_attract(io);
    }

    fn request_seed(&mut self, seed: u32, io: &mut impl Board) {
        // Zero is swapped for the default seed, as the generator would
        let seed = Lfsr::new(seed).state();
        self.pending_seed = Some(seed);
        self.log.log_system(self.uptime_ms, "seed", seed);
        io.report(&Report::Seed(seed));
    }

    fn shift_octave(&mut self, delta: i8, io: &mut impl Board) {
        self.octave = self.config.clamp_octave(self.octave.saturating_add(delta));
        self.log.log_input(
            self.uptime_ms,
            if delta < 0 { "octave down" } else { "octave up" },
            self.octave.unsigned_abs() as u32,
        );
        io.report(&Report::Octave(self.octave));
    }

    fn step_speed(&mut self, delta: i8, io: &mut impl Board) {
        let locked = self.round_locked();
        self.speed.step(&self.config, delta, locked);
        self.speed_changed(io);
    }

    fn speed_changed(&mut self, io: &mut impl Board) {
        let (index, ms) = self.speed.target();
        self.log.log_input(self.uptime_ms, "speed", ms as u32);
        io.report(&Report::Delay { ms, index });
    }

    fn apply_pending_speed(&mut self) {
        if self.speed.apply_pending() {
            self.log
                .log_system(self.uptime_ms, "speed applied", self.speed.delay_ms() as u32);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            self.log.log_debug(self.uptime_ms, "phase", phase as u32);
        }
        self.phase = phase;
    }

    fn ignore(&mut self, code: u32) {
        self.log.log_input(self.uptime_ms, "ignored", code);
    }

    fn expired(&mut self) -> bool {
        if self.countdown == 0 {
            return false;
        }
        self.countdown -= 1;
        self.countdown == 0
    }

    fn tone_expired(&mut self) -> bool {
        if self.tone_left == 0 {
            return false;
        }
        self.tone_left -= 1;
        self.tone_left == 0
    }
}

impl Default for Simon {
    fn default() -> Self {
        Self::new(GameConfig::DEFAULT)
    }
}
