//! Per-button counter debouncer
//!
//! Fed one raw button mask per millisecond tick. A button changes state only
//! after its raw level has disagreed with the stable state for
//! `BUTTON_DEBOUNCE_TICKS` consecutive samples.

use crate::board::Button;
use crate::config::BUTTON_DEBOUNCE_TICKS;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonEvent {
    Pressed(Button),
    Released(Button),
}

pub struct ButtonDebouncer {
    states: u8,
    debounce_counters: [u8; 4],
    threshold: u8,
}

impl ButtonDebouncer {
    pub fn new() -> Self {
        Self::with_threshold(BUTTON_DEBOUNCE_TICKS)
    }

    pub fn with_threshold(threshold: u8) -> Self {
        Self {
            states: 0,
            debounce_counters: [0; 4],
            threshold: threshold.max(1),
        }
    }

    /// Sample `mask` (pressed buttons set, S1 = bit 0) and report at most one
    /// edge. A second button settling on the same tick is reported on the next
    /// call.
    pub fn update(&mut self, mask: u8) -> Option<ButtonEvent> {
        for button in Button::ALL {
            let idx = button.index();
            let raw_state = mask & button.mask() != 0;

            if raw_state != self.is_pressed(button) {
                self.debounce_counters[idx] = self.debounce_counters[idx].saturating_add(1);
                if self.debounce_counters[idx] >= self.threshold {
                    self.states ^= button.mask();
                    self.debounce_counters[idx] = 0;

                    return Some(if raw_state {
                        ButtonEvent::Pressed(button)
                    } else {
                        ButtonEvent::Released(button)
                    });
                }
            } else {
                self.debounce_counters[idx] = 0;
            }
        }
        None
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.states & button.mask() != 0
    }

    /// Stable state of every button as a mask.
    pub fn pressed_mask(&self) -> u8 {
        self.states
    }
}

impl Default for ButtonDebouncer {
    fn default() -> Self {
        Self::new()
    }
}
