//! Card deck loading from a TOON batch file.

use radres_core::{cards_from_document, parse, toon::strip_code_fence, CardContent};
use std::path::Path;

/// Load cards from `path`. A missing or unreadable file yields an empty deck.
pub fn load_deck(path: &Path) -> Vec<CardContent> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::warn!("Could not read cards from {}: {}", path.display(), err);
            return Vec::new();
        }
    };
    deck_from_text(&content)
}

/// Parse a card batch, tolerating fenced output.
pub fn deck_from_text(content: &str) -> Vec<CardContent> {
    let doc = parse(strip_code_fence(content));
    match cards_from_document(&doc) {
        Ok(cards) => {
            tracing::info!("Loaded {} cards", cards.len());
            cards
        }
        Err(err) => {
            tracing::warn!("Card batch unusable: {}", err);
            Vec::new()
        }
    }
}
