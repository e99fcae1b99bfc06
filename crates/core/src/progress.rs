//! Cosmetic progress model.
//!
//! The bar shown while documentation is generated has no relation to the
//! backend's real progress. It creeps forward by random increments, never shows
//! more than [`CAP`] percent on its own, and jumps to 100 only when the request
//! settles. The random increment is supplied by the caller.

use std::time::Duration;

/// Highest percentage the bar reaches before the request settles.
pub const CAP: f64 = 95.0;

/// Upper bound (exclusive) of a single random increment.
pub const MAX_INCREMENT: f64 = 2.5;

/// Delay between completion and hiding/resetting the bar.
pub const RESET_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CosmeticProgress {
    value: f64,
}

impl CosmeticProgress {
    /// Advance by `increment`. Once the cap is reached further ticks are ignored.
    pub fn advance(self, increment: f64) -> Self {
        if self.value >= CAP {
            return self;
        }
        Self {
            value: self.value + increment.max(0.0),
        }
    }

    /// The percentage to display, capped while the request is running.
    pub fn displayed(&self) -> f64 {
        self.value.min(CAP)
    }

    pub fn complete() -> f64 {
        100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero() {
        assert_eq!(CosmeticProgress::default().displayed(), 0.0);
    }

    #[test]
    fn test_advance_accumulates() {
        let p = CosmeticProgress::default().advance(1.0).advance(2.0);
        assert_eq!(p.displayed(), 3.0);
    }

    #[test]
    fn test_never_displays_more_than_cap() {
        let mut p = CosmeticProgress::default();
        for _ in 0..1000 {
            p = p.advance(MAX_INCREMENT);
            assert!(p.displayed() <= CAP);
        }
        assert_eq!(p.displayed(), CAP);
    }

    #[test]
    fn test_overshoot_is_clamped_for_display() {
        let p = CosmeticProgress::default().advance(94.0).advance(2.4);
        assert_eq!(p.displayed(), CAP);
    }

    #[test]
    fn test_ticks_after_cap_are_ignored() {
        let capped = CosmeticProgress::default().advance(96.0);
        assert_eq!(capped.advance(2.0), capped);
    }

    #[test]
    fn test_negative_increment_is_ignored() {
        let p = CosmeticProgress::default().advance(5.0).advance(-3.0);
        assert_eq!(p.displayed(), 5.0);
    }
}
