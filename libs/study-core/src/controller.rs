//! Study run orchestration.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::algorithm::sm2::Sm2;
use crate::algorithm::SpacedRepetitionAlgorithm;
use crate::queue::select_next_due;
use crate::session::StudySession;
use crate::types::{Flashcard, Rating, ScheduleState, SessionStatus};

/// Persistence capability for schedule state.
///
/// The controller calls `save` after every accepted rating and does not wait
/// on the result; retry and backoff policy belong to the card store.
pub trait ScheduleStore {
    fn save(&mut self, card_id: Uuid, state: &ScheduleState);
}

/// Outcome of applying a rating event. Never an error: stale events are
/// reported as [`RatingOutcome::Ignored`] and the UI re-requests current
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingOutcome {
    /// Rating applied; the identified card is up next.
    NextCard(Uuid),
    /// Rating applied; no card remains due and the session is completed.
    SessionComplete,
    /// The event did not match the current session, card, or session state;
    /// nothing changed.
    Ignored,
}

/// Orchestrates one study run over a deck.
///
/// Pulls the next due card from the scheduling engine, forwards ratings to
/// both the engine and the session tally, persists rescheduled state through
/// the [`ScheduleStore`], and decides when the run ends. Single-writer: all
/// calls are expected from one logical thread of control.
pub struct StudyController<S: ScheduleStore> {
    algorithm: Sm2,
    deck: Vec<Flashcard>,
    session: StudySession,
    current: Option<Uuid>,
    last_event_at: Option<DateTime<Utc>>,
    store: S,
}

impl<S: ScheduleStore> StudyController<S> {
    pub fn new(deck: Vec<Flashcard>, store: S) -> Self {
        Self::with_algorithm(Sm2::default(), deck, store)
    }

    pub fn with_algorithm(algorithm: Sm2, deck: Vec<Flashcard>, store: S) -> Self {
        Self {
            algorithm,
            deck,
            session: StudySession::new(),
            current: None,
            last_event_at: None,
            store,
        }
    }

    /// Begin the run: select the first due card, or complete the session
    /// immediately when nothing is due.
    pub fn start(&mut self, now: DateTime<Utc>) -> Option<&Flashcard> {
        match select_next_due(&self.deck, now).map(|card| card.id) {
            Some(id) => {
                self.current = Some(id);
                self.last_event_at = Some(now);
            }
            None => {
                self.current = None;
                self.session.complete();
            }
        }
        self.current_card()
    }

    /// The card currently presented to the learner, if any.
    pub fn current_card(&self) -> Option<&Flashcard> {
        self.current.and_then(|id| self.deck.iter().find(|card| card.id == id))
    }

    /// Read-only session counters for progress display.
    pub fn progress(&self) -> &StudySession {
        &self.session
    }

    /// Apply a learner rating to the current card.
    ///
    /// Events carrying a stale session id, a card other than the current one,
    /// or arriving after completion are discarded without touching any state;
    /// this keeps ratings applied in arrival order and prevents a rapid-fire
    /// UI race from double-scheduling a card.
    pub fn apply_rating(
        &mut self,
        session_id: Uuid,
        card_id: Uuid,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> RatingOutcome {
        if session_id != self.session.session_id()
            || self.session.status() == SessionStatus::Completed
            || self.current != Some(card_id)
        {
            tracing::debug!(%session_id, %card_id, "discarding stale rating event");
            return RatingOutcome::Ignored;
        }
        let Some(index) = self.deck.iter().position(|card| card.id == card_id) else {
            tracing::debug!(%card_id, "rated card is not in the deck");
            return RatingOutcome::Ignored;
        };

        let result = self.algorithm.schedule(&self.deck[index].srs, rating, now);
        self.deck[index].srs = result.new_state;
        self.store.save(card_id, &self.deck[index].srs);

        let elapsed = self
            .last_event_at
            .map_or(0, |at| (now - at).num_seconds().max(0) as u64);
        self.last_event_at = Some(now);
        // Cannot fail: completion was checked above.
        self.session.record_answer(rating.is_correct(), elapsed).ok();

        // The just-reviewed card is re-admitted only once every other due
        // card is exhausted, so a zero-day relearn step never repeats a card
        // back-to-back while others wait.
        let next = select_next_due(self.deck.iter().filter(|card| card.id != card_id), now)
            .map(|card| card.id)
            .or_else(|| {
                let just_reviewed = self.deck.iter().find(|card| card.id == card_id)?;
                just_reviewed.srs.is_due(now).then_some(just_reviewed.id)
            });

        match next {
            Some(id) => {
                self.current = Some(id);
                RatingOutcome::NextCard(id)
            }
            None => {
                self.current = None;
                self.session.complete();
                RatingOutcome::SessionComplete
            }
        }
    }

    /// Record a viewed content segment on the session.
    pub fn mark_segment_viewed(&mut self, segment_id: impl Into<String>) -> bool {
        self.session.mark_segment_viewed(segment_id)
    }

    /// Discard the current run, keeping the deck and all already-applied
    /// schedule updates. A fresh session identity is issued.
    pub fn reset(&mut self) {
        self.session.reset();
        self.current = None;
        self.last_event_at = None;
    }

    /// Give the deck back, for callers that swap decks between runs.
    pub fn into_deck(self) -> Vec<Flashcard> {
        self.deck
    }
}
