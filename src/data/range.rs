//! Inclusive year interval used by the filter and the slider.

use crate::config::DEFAULT_YEAR_RANGE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub low: i32,
    pub high: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if given in reverse.
    pub fn new(low: i32, high: i32) -> Self {
        if low <= high {
            Self { low, high }
        } else {
            Self {
                low: high,
                high: low,
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.low..=self.high).contains(&year)
    }

    /// True when `self` lies entirely inside `other`.
    pub fn is_within(&self, other: &YearRange) -> bool {
        other.low <= self.low && self.high <= other.high
    }

    /// Clamp both bounds into `[min, max]`.
    pub fn clamp_to(self, (min, max): (i32, i32)) -> Self {
        let low = self.low.clamp(min, max);
        let high = self.high.clamp(low, max);
        Self { low, high }
    }

    /// Initial slider position: `preferred` clamped to the data's years.
    pub fn default_for(preferred: (i32, i32), bounds: Option<(i32, i32)>) -> Self {
        let preferred = Self::new(preferred.0, preferred.1);
        match bounds {
            Some(bounds) => preferred.clamp_to(bounds),
            None => preferred,
        }
    }
}

impl Default for YearRange {
    fn default() -> Self {
        Self::default_for(DEFAULT_YEAR_RANGE, None)
    }
}
