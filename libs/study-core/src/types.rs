//! Core types for the study scheduler.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rating for a review.
///
/// The product surfaces three buttons; the full 0-5 SM-2 quality scale is
/// available through [`Rating::from_quality`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Good,
    Easy,
}

impl Rating {
    /// SM-2 quality value: Again = 1, Good = 3, Easy = 5.
    pub fn quality(self) -> u8 {
        match self {
            Self::Again => 1,
            Self::Good => 3,
            Self::Easy => 5,
        }
    }

    /// Map a 0-5 quality value onto the three-button scale.
    pub fn from_quality(quality: u8) -> Option<Self> {
        match quality {
            0..=2 => Some(Self::Again),
            3 | 4 => Some(Self::Good),
            5 => Some(Self::Easy),
            _ => None,
        }
    }

    /// Whether the review counts as a successful recall.
    pub fn is_correct(self) -> bool {
        !matches!(self, Self::Again)
    }
}

/// Per-card schedule state, owned by the scheduling engine.
///
/// The card store persists this record but must not mutate it independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleState {
    /// Days until the card is next due.
    pub interval_days: f64,
    /// Consecutive successful reviews since the last failure.
    pub repetition: u32,
    /// Growth multiplier for review intervals, never below 1.3.
    pub ease_factor: f64,
    /// Absent means never scheduled: the card is due immediately.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<DateTime<Utc>>,
    /// Lifetime review count, the only field that is monotonic.
    pub total_reviews: u32,
}

impl Default for ScheduleState {
    fn default() -> Self {
        Self {
            interval_days: 0.0,
            repetition: 0,
            ease_factor: 2.5,
            due_date: None,
            last_reviewed: None,
            total_reviews: 0,
        }
    }
}

impl ScheduleState {
    /// Whether the card is eligible for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due <= now,
            None => true,
        }
    }

    /// Corrupt records (negative or non-finite numeric fields) are treated
    /// as unseen cards rather than propagated.
    pub fn is_valid(&self) -> bool {
        self.ease_factor.is_finite()
            && self.ease_factor >= 0.0
            && self.interval_days.is_finite()
            && self.interval_days >= 0.0
    }
}

/// A flashcard with its schedule state.
///
/// Front and back payloads are opaque to the scheduler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: Uuid,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub tags: HashSet<String>,
    pub created_at: DateTime<Utc>,
    pub srs: ScheduleState,
}

impl Flashcard {
    /// Create a card that has never been reviewed.
    pub fn new(front: impl Into<String>, back: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            front: front.into(),
            back: back.into(),
            tags: HashSet::new(),
            created_at,
            srs: ScheduleState::default(),
        }
    }
}

/// Study session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}
