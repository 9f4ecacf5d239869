//! API request and response types

use serde::{Deserialize, Serialize};

// Re-export shared types from radres-core
pub use radres_core::types::{CardProgress, DueCard, Rating};

// === Identity ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityResponse {
    pub authenticated: bool,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
}

// === Stats ===

/// Returned when a user has no stored stats yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultStats {
    pub streak: u32,
    pub due_today: u32,
    pub accuracy: f64,
    pub user_email: String,
}

impl DefaultStats {
    pub fn for_user(email: &str) -> Self {
        Self {
            streak: 0,
            due_today: 0,
            accuracy: 0.0,
            user_email: email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// === Study ===

#[derive(Debug, Clone, Deserialize)]
pub struct StudyQueueQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyQueueResponse {
    pub cards: Vec<DueCard>,
    pub deck_size: usize,
}

/// Review submission. `rating` is the raw grade (1-4); other values are
/// recorded as a review without changing the schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub card_id: String,
    pub rating: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub card_id: String,
    /// Grade applied, or `None` when the rating was out of range.
    pub rating: Option<Rating>,
    pub progress: CardProgress,
}
