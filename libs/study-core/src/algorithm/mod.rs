//! Spaced repetition scheduling.

pub mod sm2;

use chrono::{DateTime, Utc};

use crate::types::{Rating, ScheduleState};

/// Result of scheduling a card after review.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    pub new_state: ScheduleState,
    pub next_due: DateTime<Utc>,
}

/// Trait for spaced repetition algorithms.
///
/// Implementations must be pure: no side effects, deterministic for a given
/// state, rating, and clock value.
pub trait SpacedRepetitionAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next review state after a review.
    fn schedule(&self, state: &ScheduleState, rating: Rating, now: DateTime<Utc>) -> SchedulingResult;

    /// Initial state for a card that has never been reviewed.
    fn initial_state(&self) -> ScheduleState;
}
