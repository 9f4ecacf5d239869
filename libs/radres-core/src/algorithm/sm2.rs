//! Modified SM-2 spaced repetition algorithm.
//!
//! Each grade adjusts interval and ease on its own terms: Again and Hard only
//! clamp ease from below, Good leaves ease alone, Easy caps it from above.

use super::SpacedRepetitionAlgorithm;
use crate::types::CardProgress;
use chrono::{DateTime, Duration, Utc};

/// SM-2 variant with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    pub maximum_ease: f64,
    pub again_penalty: f64,
    pub hard_penalty: f64,
    pub easy_boost: f64,
    pub hard_multiplier: f64,
    pub easy_bonus: f64,
    /// Longest interval in days; keeps due dates representable.
    pub maximum_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            maximum_ease: 2.5,
            again_penalty: 0.2,
            hard_penalty: 0.15,
            easy_boost: 0.1,
            hard_multiplier: 1.2,
            easy_bonus: 1.3,
            maximum_interval: 36_500,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self, now: DateTime<Utc>) -> CardProgress {
        CardProgress {
            ease: self.initial_ease,
            ..CardProgress::new(now)
        }
    }

    fn schedule(&self, state: &CardProgress, rating: u8, now: DateTime<Utc>) -> CardProgress {
        let mut next = state.clone();
        // Zeroes come from incompletely stored state.
        if next.ease.is_nan() || next.ease <= 0.0 {
            next.ease = self.initial_ease;
        }
        next.interval = next.interval.clamp(1, self.maximum_interval);
        next.reviews = next.reviews.saturating_add(1);

        let ease = next.ease;
        let interval = f64::from(next.interval);

        match rating {
            1 => {
                next.lapses = next.lapses.saturating_add(1);
                next.interval = 1;
                next.ease = (ease - self.again_penalty).max(self.minimum_ease);
            }
            2 => {
                next.interval = self.interval_days(interval * self.hard_multiplier);
                next.ease = (ease - self.hard_penalty).max(self.minimum_ease);
            }
            3 => {
                next.interval = self.interval_days(interval * ease);
            }
            4 => {
                next.interval = self.interval_days(interval * ease * self.easy_bonus);
                next.ease = (ease + self.easy_boost).min(self.maximum_ease);
            }
            _ => {}
        }

        next.due_date = now
            .checked_add_signed(Duration::days(i64::from(next.interval)))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        next.last_reviewed = Some(now);
        next
    }
}

impl Sm2 {
    /// Nearest whole day, halves rounding up, within `1..=maximum_interval`.
    fn interval_days(&self, days: f64) -> u32 {
        let rounded = days.round();
        if rounded.is_nan() || rounded < 1.0 {
            return 1;
        }
        if rounded >= f64::from(self.maximum_interval) {
            return self.maximum_interval;
        }
        // In range, so the conversion is exact.
        rounded as u32
    }
}
