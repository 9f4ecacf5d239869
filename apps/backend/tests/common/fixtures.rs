//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Generate a TOON card batch with `num_cards` cards (`card_001`, ...).
pub fn sample_deck(num_cards: usize) -> String {
    let rows: Vec<String> = (1..=num_cards)
        .map(|i| {
            format!(
                "  card_{:03},neuro,medium,\"Question {}, part A?\",Answer {},RSNA,neuro;test",
                i, i, i
            )
        })
        .collect();

    format!(
        "cards[{}]{{id,category,difficulty,front,back,source,tags}}:\n{}\n",
        num_cards,
        rows.join("\n")
    )
}

/// Body for POST /api/study/review.
pub fn review_request(card_id: &str, rating: i64) -> Value {
    json!({ "card_id": card_id, "rating": rating })
}
