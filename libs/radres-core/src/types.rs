//! Core types for cards and review progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Convert to 4-point numeric value (1-4).
    pub fn to_value(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Hard => 2,
            Self::Good => 3,
            Self::Easy => 4,
        }
    }

    /// Create from 4-point numeric value.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Again),
            2 => Some(Self::Hard),
            3 => Some(Self::Good),
            4 => Some(Self::Easy),
            _ => None,
        }
    }
}

fn default_ease() -> f64 {
    2.5
}

fn default_interval() -> u32 {
    1
}

/// Per-user review state of one card.
///
/// Missing numeric fields deserialize to their initial values so partially
/// stored progress stays usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardProgress {
    #[serde(default = "default_ease")]
    pub ease: f64,
    /// Days until the next review.
    #[serde(default = "default_interval")]
    pub interval: u32,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub lapses: u32,
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl CardProgress {
    /// State of a card never reviewed, due immediately.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            ease: default_ease(),
            interval: default_interval(),
            due_date: now,
            lapses: 0,
            reviews: 0,
            last_reviewed: None,
        }
    }
}

/// Authored card content. Never changed by scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardContent {
    pub id: String,
    pub category: String,
    pub difficulty: String,
    pub front: String,
    pub back: String,
    pub source: String,
    /// Semicolon-joined tag list.
    pub tags: String,
}

impl CardContent {
    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// A card selected for review, with its progress and queue priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DueCard {
    #[serde(flatten)]
    pub card: CardContent,
    #[serde(flatten)]
    pub progress: CardProgress,
    pub priority: i64,
}
