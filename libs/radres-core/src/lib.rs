//! Core library for the RadRes study app.
//!
//! Provides:
//! - TOON parser and serializer for card batches, configuration and digests
//! - Typed views over parsed documents (cards, feed sources, digests)
//! - Modified SM-2 scheduling and review queue selection
//! - Shared types (CardContent, CardProgress, Rating, DueCard)

pub mod algorithm;
pub mod content;
pub mod error;
pub mod toon;
pub mod types;

pub use algorithm::{due_cards, initial_state, priority, update_card, SpacedRepetitionAlgorithm};
pub use content::{cards_from_document, cards_to_document, rss_sources_from_document, Digest, RssSource};
pub use error::{DocumentError, Result};
pub use toon::{parse, stringify, Document, Record, Scalar, Value};
pub use types::{CardContent, CardProgress, DueCard, Rating};
