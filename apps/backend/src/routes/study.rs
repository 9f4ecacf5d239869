//! Study endpoints

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;
use radres_core::{due_cards, initial_state, update_card};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::storage::{KvStore, StorageError};
use crate::AppState;

/// Store key holding a user's progress map.
pub fn progress_key(email: &str) -> String {
    format!("progress:{}", email)
}

fn load_progress(
    store: &dyn KvStore,
    email: &str,
) -> std::result::Result<HashMap<String, CardProgress>, StorageError> {
    match store.get(&progress_key(email))? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(HashMap::new()),
    }
}

/// GET /api/study/queue
pub async fn queue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<StudyQueueQuery>,
) -> Result<Json<StudyQueueResponse>> {
    let progress = load_progress(state.store.as_ref(), &auth.email)?;
    let limit = query.limit.unwrap_or(state.config.due_limit);

    let cards = due_cards(&progress, &state.deck, limit, Utc::now());

    Ok(Json(StudyQueueResponse {
        cards,
        deck_size: state.deck.len(),
    }))
}

/// POST /api/study/review
pub async fn review(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<SubmitReviewRequest>,
) -> Result<Json<SubmitReviewResponse>> {
    if payload.card_id.trim().is_empty() {
        return Err(ApiError::BadRequest("card_id is required".to_string()));
    }
    if !state.deck.iter().any(|card| card.id == payload.card_id) {
        return Err(ApiError::NotFound(format!("Card {}", payload.card_id)));
    }

    // Out-of-range grades fall through as a plain review.
    let rating = u8::try_from(payload.rating).unwrap_or(0);
    let now = Utc::now();
    let mut updated = None;

    state
        .store
        .update(&progress_key(&auth.email), &mut |current| {
            let mut progress: HashMap<String, CardProgress> = match current {
                Some(raw) => serde_json::from_str(raw)?,
                None => HashMap::new(),
            };

            let before = progress
                .get(&payload.card_id)
                .cloned()
                .unwrap_or_else(|| initial_state(now));
            let after = update_card(&before, rating, now);
            progress.insert(payload.card_id.clone(), after.clone());
            updated = Some(after);

            Ok(serde_json::to_string(&progress)?)
        })?;

    let progress = updated.ok_or_else(|| ApiError::Internal("review not applied".to_string()))?;

    let grade = Rating::from_value(rating);
    tracing::debug!(
        "Reviewed {} for {}: rating {} ({:?}), next due {}",
        payload.card_id,
        auth.email,
        payload.rating,
        grade,
        progress.due_date
    );

    Ok(Json(SubmitReviewResponse {
        card_id: payload.card_id,
        rating: grade,
        progress,
    }))
}
