//! Configuration constants and runtime tunables for the Simon firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// CPU frequency as reported by the build script
pub const BUILD_FREQ_HZ: &str = env!("MCU_FREQ_HZ");

/// UART baud rate
pub const UART_BAUD: u32 = 9600;

/// Tick period of the game clock in milliseconds
pub const TICK_MS: u32 = 1;

/// Button debounce time in ticks (one tick per millisecond)
pub const BUTTON_DEBOUNCE_TICKS: u8 = 20;

/// Potentiometer sampling interval in milliseconds
pub const POT_SAMPLE_MS: u32 = 20;

/// Minimum change in raw ADC counts before a new pot value is reported
pub const POT_HYSTERESIS: u16 = 8;

/// Full-scale ADC reading (10-bit converter)
pub const ADC_MAX: u16 = 1023;

/// Longest sequence the game can hold
pub const MAX_SEQUENCE: usize = 64;

/// Number of high-score slots
pub const MAX_HIGHSCORES: usize = 5;

/// Longest name stored in the high-score table
pub const MAX_NAME_LEN: usize = 12;

/// Name committed when the player leaves the buffer empty
pub const DEFAULT_NAME: &str = "PLAYER";

/// Seed substituted whenever the generator would be seeded with zero
pub const DEFAULT_SEED: u32 = 0x2DF5_99AC;

/// Capacity of the in-RAM event log
pub const LOG_CAPACITY: usize = 16;

/// Runtime tunables for a game session.
///
/// Out-of-range values are never rejected; [`GameConfig::sanitized`] clamps
/// them to the nearest usable bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub min_delay_ms: u16,
    pub max_delay_ms: u16,
    pub speed_steps: u8,
    pub default_speed: u8,
    pub default_seed: u32,
    pub min_octave: i8,
    pub max_octave: i8,
    pub max_level: u8,
    pub round_pause_ms: u16,
    pub success_tone_ms: u16,
    pub failure_pause_ms: u16,
    pub name_timeout_ms: u16,
    pub idle_frame_ms: u16,
}

impl GameConfig {
    pub const DEFAULT: Self = Self {
        min_delay_ms: 250,
        max_delay_ms: 1250,
        speed_steps: 10,
        default_speed: 4,
        default_seed: 0x1357_9BDF,
        min_octave: -2,
        max_octave: 2,
        max_level: MAX_SEQUENCE as u8,
        round_pause_ms: 800,
        success_tone_ms: 200,
        failure_pause_ms: 1200,
        name_timeout_ms: 10_000,
        idle_frame_ms: 125,
    };

    /// Clamp every field into its usable range.
    pub fn sanitized(mut self) -> Self {
        // A delay of 1ms cannot be split into two non-empty tone phases.
        self.min_delay_ms = self.min_delay_ms.max(2);
        self.max_delay_ms = self.max_delay_ms.max(self.min_delay_ms);
        self.speed_steps = self.speed_steps.max(1);
        self.default_speed = self.default_speed.min(self.speed_steps - 1);
        if self.default_seed == 0 {
            self.default_seed = DEFAULT_SEED;
        }
        if self.min_octave > 0 {
            self.min_octave = 0;
        }
        if self.max_octave < 0 {
            self.max_octave = 0;
        }
        self.max_level = self.max_level.clamp(1, MAX_SEQUENCE as u8);
        self.round_pause_ms = self.round_pause_ms.max(1);
        self.success_tone_ms = self.success_tone_ms.min(self.round_pause_ms);
        self.failure_pause_ms = self.failure_pause_ms.max(1);
        self.name_timeout_ms = self.name_timeout_ms.max(1);
        self.idle_frame_ms = self.idle_frame_ms.max(1);
        self
    }

    pub fn clamp_octave(&self, octave: i8) -> i8 {
        octave.clamp(self.min_octave, self.max_octave)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
