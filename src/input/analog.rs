//! Potentiometer hysteresis filter

use crate::config::{ADC_MAX, POT_HYSTERESIS};

pub struct PotSampler {
    last: Option<u16>,
    hysteresis: u16,
}

impl PotSampler {
    pub const fn new() -> Self {
        Self::with_hysteresis(POT_HYSTERESIS)
    }

    pub const fn with_hysteresis(hysteresis: u16) -> Self {
        Self {
            last: None,
            hysteresis,
        }
    }

    /// Returns the sample when it moved far enough from the last reported one.
    ///
    /// The first sample is always reported. Reaching either end of the range
    /// is reported even inside the dead band so the extremes stay reachable.
    pub fn update(&mut self, sample: u16) -> Option<u16> {
        let sample = sample.min(ADC_MAX);
        let report = match self.last {
            None => true,
            Some(last) if last == sample => false,
            Some(last) => {
                last.abs_diff(sample) >= self.hysteresis || sample == 0 || sample == ADC_MAX
            }
        };

        if report {
            self.last = Some(sample);
            Some(sample)
        } else {
            None
        }
    }

    pub fn last(&self) -> Option<u16> {
        self.last
    }
}

impl Default for PotSampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_wobble_is_ignored() {
        let mut pot = PotSampler::new();
        assert_eq!(pot.update(500), Some(500));
        for sample in [503, 497, 507, 493] {
            assert_eq!(pot.update(sample), None);
        }
        assert_eq!(pot.update(508), Some(508));
        assert_eq!(pot.last(), Some(508));
    }

    #[test]
    fn extremes_always_land() {
        let mut pot = PotSampler::new();
        pot.update(1020);
        assert_eq!(pot.update(1023), Some(1023));
        pot.update(3);
        assert_eq!(pot.update(0), Some(0));
        assert_eq!(pot.update(0), None);
    }

    #[test]
    fn out_of_range_samples_clamp() {
        let mut pot = PotSampler::new();
        assert_eq!(pot.update(4095), Some(ADC_MAX));
    }
}
