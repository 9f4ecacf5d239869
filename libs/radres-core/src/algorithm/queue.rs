//! Review queue selection.

use super::initial_state;
use crate::types::{CardContent, CardProgress, DueCard};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const BASE_PRIORITY: i64 = 100;
const LAPSE_WEIGHT: i64 = 20;
const OVERDUE_WEIGHT: i64 = 5;
const MAX_OVERDUE_BONUS: i64 = 50;

/// Queue priority of a due card. Lapses lower it; whole days overdue raise it
/// up to a fixed bonus.
pub fn priority(state: &CardProgress, now: DateTime<Utc>) -> i64 {
    let days_overdue = (now - state.due_date).num_days().max(0);
    BASE_PRIORITY - LAPSE_WEIGHT * i64::from(state.lapses)
        + (OVERDUE_WEIGHT * days_overdue).min(MAX_OVERDUE_BONUS)
}

/// Cards due at `now`, highest priority first, at most `limit` of them.
///
/// Cards without progress are treated as new and therefore due. Equal
/// priorities keep the order of `cards`.
pub fn due_cards(
    progress: &HashMap<String, CardProgress>,
    cards: &[CardContent],
    limit: usize,
    now: DateTime<Utc>,
) -> Vec<DueCard> {
    let mut due: Vec<DueCard> = cards
        .iter()
        .filter_map(|card| {
            let state = progress
                .get(&card.id)
                .cloned()
                .unwrap_or_else(|| initial_state(now));
            (state.due_date <= now).then(|| DueCard {
                card: card.clone(),
                priority: priority(&state, now),
                progress: state,
            })
        })
        .collect();

    due.sort_by(|a, b| b.priority.cmp(&a.priority));
    due.truncate(limit);
    due
}
