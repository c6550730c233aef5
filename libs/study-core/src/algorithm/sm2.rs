//! SM-2 spaced repetition algorithm.
//!
//! Based on SuperMemo 2 with configurable parameters. Failure applies the
//! quality-based ease penalty rather than resetting ease to a fixed value,
//! and ease never drops below the minimum.

use chrono::{DateTime, Duration, Utc};

use super::{SchedulingResult, SpacedRepetitionAlgorithm};
use crate::types::{Rating, ScheduleState};

/// SM-2 algorithm with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub initial_ease: f64,
    pub minimum_ease: f64,
    /// Interval after the first successful review, in days.
    pub first_interval: f64,
    /// Interval after the second consecutive successful review, in days.
    pub second_interval: f64,
    /// Interval after a failed review, in days. May be fractional for an
    /// intraday relearn step; failure resets the repetition count either way.
    pub relearn_interval: f64,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            initial_ease: 2.5,
            minimum_ease: 1.3,
            first_interval: 1.0,
            second_interval: 6.0,
            relearn_interval: 1.0,
        }
    }
}

impl SpacedRepetitionAlgorithm for Sm2 {
    fn name(&self) -> &'static str {
        "sm2"
    }

    fn initial_state(&self) -> ScheduleState {
        ScheduleState {
            interval_days: 0.0,
            repetition: 0,
            ease_factor: self.initial_ease,
            due_date: None,
            last_reviewed: None,
            total_reviews: 0,
        }
    }

    fn schedule(&self, state: &ScheduleState, rating: Rating, now: DateTime<Utc>) -> SchedulingResult {
        let state = self.sanitize(state);

        let miss = f64::from(5 - rating.quality());
        let new_ease = (state.ease_factor + 0.1 - miss * (0.08 + miss * 0.02)).max(self.minimum_ease);

        let (new_repetition, new_interval) = if rating.is_correct() {
            let repetition = state.repetition + 1;
            let interval = match repetition {
                1 => self.first_interval,
                2 => self.second_interval,
                _ => (state.interval_days * new_ease).round(),
            };
            (repetition, interval)
        } else {
            (0, self.relearn_interval)
        };

        let next_due = now + Duration::seconds((new_interval * 86_400.0).round() as i64);

        SchedulingResult {
            new_state: ScheduleState {
                interval_days: new_interval,
                repetition: new_repetition,
                ease_factor: new_ease,
                due_date: Some(next_due),
                last_reviewed: Some(now),
                total_reviews: state.total_reviews + 1,
            },
            next_due,
        }
    }
}

impl Sm2 {
    /// Substitute unseen-card defaults for corrupt schedule records.
    fn sanitize(&self, state: &ScheduleState) -> ScheduleState {
        if state.is_valid() {
            state.clone()
        } else {
            tracing::warn!(
                ease_factor = state.ease_factor,
                interval_days = state.interval_days,
                "corrupt schedule state, treating card as unseen"
            );
            self.initial_state()
        }
    }
}
