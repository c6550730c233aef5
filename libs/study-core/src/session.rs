//! Session progress tracking.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::error::{Result, SessionError};
use crate::types::SessionStatus;

/// Running statistics for one study session.
///
/// A single-owner state machine: `not-started` moves to `in-progress` on the
/// first recorded answer and to `completed` on [`StudySession::complete`].
/// Session statistics are ephemeral; only per-card schedule state is durable.
/// Fields are private so counters can only move through the recorded
/// operations, which keeps `correct_answers <= total_studied` by
/// construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    session_id: Uuid,
    segments_viewed: HashSet<String>,
    total_studied: u32,
    correct_answers: u32,
    time_spent_seconds: u64,
    status: SessionStatus,
}

impl Default for StudySession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudySession {
    /// Create a fresh session in the `not-started` state.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            segments_viewed: HashSet::new(),
            total_studied: 0,
            correct_answers: 0,
            time_spent_seconds: 0,
            status: SessionStatus::NotStarted,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn total_studied(&self) -> u32 {
        self.total_studied
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn time_spent_seconds(&self) -> u64 {
        self.time_spent_seconds
    }

    /// Content segments the learner has been shown, for progress display.
    pub fn segments_viewed(&self) -> &HashSet<String> {
        &self.segments_viewed
    }

    /// Record one answered card.
    ///
    /// The first call moves the session to `in-progress`. Rejected once the
    /// session is completed; only [`StudySession::reset`] is accepted then.
    pub fn record_answer(&mut self, correct: bool, time_spent_seconds: u64) -> Result<()> {
        if self.status == SessionStatus::Completed {
            return Err(SessionError::AlreadyCompleted);
        }
        self.status = SessionStatus::InProgress;
        self.total_studied += 1;
        if correct {
            self.correct_answers += 1;
        }
        self.time_spent_seconds += time_spent_seconds;
        debug_assert!(self.correct_answers <= self.total_studied);
        Ok(())
    }

    /// Mark a content segment as viewed. Idempotent; returns whether the
    /// segment was newly added. Ignored after completion.
    pub fn mark_segment_viewed(&mut self, segment_id: impl Into<String>) -> bool {
        if self.status == SessionStatus::Completed {
            return false;
        }
        self.segments_viewed.insert(segment_id.into())
    }

    /// Move the session to `completed`.
    pub fn complete(&mut self) {
        self.status = SessionStatus::Completed;
    }

    /// Return all counters to zero and the state to `not-started`.
    ///
    /// Always available, from any state. The old session identity is
    /// discarded: a fresh id is issued, so events referencing the previous
    /// run can never match again.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_answer_starts_the_session() {
        let mut session = StudySession::new();
        assert_eq!(session.status(), SessionStatus::NotStarted);
        session.record_answer(true, 4).unwrap();
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.total_studied(), 1);
        assert_eq!(session.correct_answers(), 1);
        assert_eq!(session.time_spent_seconds(), 4);
    }

    #[test]
    fn counters_accumulate() {
        let mut session = StudySession::new();
        session.record_answer(true, 3).unwrap();
        session.record_answer(false, 7).unwrap();
        session.record_answer(true, 2).unwrap();
        assert_eq!(session.total_studied(), 3);
        assert_eq!(session.correct_answers(), 2);
        assert_eq!(session.time_spent_seconds(), 12);
        assert!(session.correct_answers() <= session.total_studied());
    }

    #[test]
    fn answers_rejected_after_completion() {
        let mut session = StudySession::new();
        session.record_answer(true, 1).unwrap();
        session.complete();
        assert_eq!(
            session.record_answer(true, 1),
            Err(SessionError::AlreadyCompleted)
        );
        assert_eq!(session.total_studied(), 1);
    }

    #[test]
    fn segment_views_are_idempotent() {
        let mut session = StudySession::new();
        assert!(session.mark_segment_viewed("lesson-1/para-2"));
        assert!(!session.mark_segment_viewed("lesson-1/para-2"));
        assert_eq!(session.segments_viewed().len(), 1);
        session.complete();
        assert!(!session.mark_segment_viewed("lesson-1/para-3"));
        assert_eq!(session.segments_viewed().len(), 1);
    }

    #[test]
    fn reset_clears_everything_and_changes_identity() {
        let mut session = StudySession::new();
        let old_id = session.session_id();
        session.record_answer(false, 9).unwrap();
        session.mark_segment_viewed("seg");
        session.complete();

        session.reset();
        assert_eq!(session.status(), SessionStatus::NotStarted);
        assert_eq!(session.total_studied(), 0);
        assert_eq!(session.correct_answers(), 0);
        assert_eq!(session.time_spent_seconds(), 0);
        assert!(session.segments_viewed().is_empty());
        assert_ne!(session.session_id(), old_id);
    }

    #[test]
    fn reset_available_from_any_state() {
        let mut session = StudySession::new();
        session.reset();
        assert_eq!(session.status(), SessionStatus::NotStarted);

        session.record_answer(true, 1).unwrap();
        session.reset();
        assert_eq!(session.status(), SessionStatus::NotStarted);
        // Usable again after reset.
        session.record_answer(true, 1).unwrap();
        assert_eq!(session.total_studied(), 1);
    }

    #[test]
    fn snapshot_serializes_with_product_field_names() {
        let mut session = StudySession::new();
        session.record_answer(true, 5).unwrap();
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["totalStudied"], 1);
        assert_eq!(json["correctAnswers"], 1);
        assert_eq!(json["timeSpentSeconds"], 5);
        assert_eq!(json["status"], "in-progress");
    }
}
