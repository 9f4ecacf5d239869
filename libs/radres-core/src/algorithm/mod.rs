//! Spaced repetition scheduling.
//!
//! Every operation takes `now` explicitly; nothing reads the clock.

pub mod queue;
pub mod sm2;

pub use queue::{due_cards, priority};

use crate::types::CardProgress;
use chrono::{DateTime, Utc};

/// Trait for spaced repetition algorithms.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Initial state for a card never reviewed, due at `now`.
    fn initial_state(&self, now: DateTime<Utc>) -> CardProgress;

    /// Next state after a review graded `rating` (1 = again .. 4 = easy).
    /// Grades outside that range still count as a review.
    fn schedule(&self, state: &CardProgress, rating: u8, now: DateTime<Utc>) -> CardProgress;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn SpacedRepetitionAlgorithm>> {
    match name {
        "sm2" => Some(Box::new(sm2::Sm2::default())),
        _ => None,
    }
}

/// Initial state under the default algorithm.
pub fn initial_state(now: DateTime<Utc>) -> CardProgress {
    sm2::Sm2::default().initial_state(now)
}

/// Apply one review under the default algorithm.
pub fn update_card(state: &CardProgress, rating: u8, now: DateTime<Utc>) -> CardProgress {
    sm2::Sm2::default().schedule(state, rating, now)
}
