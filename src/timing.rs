//! Speed setting to playback/tone duration mapping

use crate::config::{GameConfig, ADC_MAX};

/// Tone on/off split of one playback step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToneTiming {
    pub delay_ms: u16,
    pub on_ms: u16,
    pub off_ms: u16,
}

impl ToneTiming {
    /// Half the delay (rounded up) sounding, the remainder silent.
    ///
    /// Both halves are at least 1ms; for delays of 2ms and more they always
    /// sum to `delay_ms`.
    pub fn from_delay(delay_ms: u16) -> Self {
        let on_ms = ((delay_ms as u32 + 1) / 2).max(1) as u16;
        let off_ms = delay_ms.saturating_sub(on_ms).max(1);
        Self {
            delay_ms,
            on_ms,
            off_ms,
        }
    }
}

/// Delay for a discrete speed index, clamped to `[0, speed_steps - 1]`.
pub fn delay_for_index(config: &GameConfig, index: u8) -> u16 {
    let last = config.speed_steps.saturating_sub(1);
    if last == 0 {
        return config.min_delay_ms;
    }
    let index = index.min(last) as u32;
    let span = (config.max_delay_ms - config.min_delay_ms) as u32;
    config.min_delay_ms + (span * index / last as u32) as u16
}

/// Delay for a raw 10-bit analog sample.
pub fn delay_for_sample(config: &GameConfig, sample: u16) -> u16 {
    let sample = sample.min(ADC_MAX) as u32;
    let span = (config.max_delay_ms - config.min_delay_ms) as u32;
    config.min_delay_ms + (span * sample / ADC_MAX as u32) as u16
}

/// Speed index whose delay is closest to `delay_ms`.
pub fn nearest_index(config: &GameConfig, delay_ms: u16) -> u8 {
    let last = config.speed_steps.saturating_sub(1) as u32;
    let span = (config.max_delay_ms - config.min_delay_ms) as u32;
    if last == 0 || span == 0 {
        return 0;
    }
    let offset = delay_ms.clamp(config.min_delay_ms, config.max_delay_ms) - config.min_delay_ms;
    ((offset as u32 * last + span / 2) / span) as u8
}

/// Current playback speed plus a value staged for the next round boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpeedControl {
    index: u8,
    delay_ms: u16,
    pending: Option<(u8, u16)>,
}

impl SpeedControl {
    pub fn new(config: &GameConfig) -> Self {
        let index = config.default_speed;
        Self {
            index,
            delay_ms: delay_for_index(config, index),
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u16 {
        self.delay_ms
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    /// The setting that will be active once any pending change lands.
    pub fn target(&self) -> (u8, u16) {
        self.pending.unwrap_or((self.index, self.delay_ms))
    }

    pub fn pending(&self) -> Option<u16> {
        self.pending.map(|(_, delay)| delay)
    }

    pub fn timing(&self) -> ToneTiming {
        ToneTiming::from_delay(self.delay_ms)
    }

    pub fn set_index(&mut self, config: &GameConfig, index: u8, locked: bool) {
        let index = index.min(config.speed_steps.saturating_sub(1));
        self.stage(index, delay_for_index(config, index), locked);
    }

    /// Move the index by `delta` steps from its target value.
    pub fn step(&mut self, config: &GameConfig, delta: i8, locked: bool) {
        let (index, _) = self.target();
        let index = if delta < 0 {
            index.saturating_sub(delta.unsigned_abs())
        } else {
            index.saturating_add(delta as u8)
        };
        self.set_index(config, index, locked);
    }

    pub fn set_sample(&mut self, config: &GameConfig, sample: u16, locked: bool) {
        let delay_ms = delay_for_sample(config, sample);
        self.stage(nearest_index(config, delay_ms), delay_ms, locked);
    }

    /// Returns `true` when a pending change was applied.
    pub fn apply_pending(&mut self) -> bool {
        match self.pending.take() {
            Some((index, delay_ms)) => {
                self.index = index;
                self.delay_ms = delay_ms;
                true
            }
            None => false,
        }
    }

    fn stage(&mut self, index: u8, delay_ms: u16, locked: bool) {
        if locked {
            self.pending = Some((index, delay_ms));
        } else {
            self.pending = None;
            self.index = index;
            self.delay_ms = delay_ms;
        }
    }
}
