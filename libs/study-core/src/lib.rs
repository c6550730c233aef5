//! Spaced-repetition core for the study application.
//!
//! Provides:
//! - SM-2 scheduling engine (pure, deterministic, no I/O)
//! - Deterministic due-card selection over a deck
//! - Session progress tracking (answered / correct / time spent)
//! - Study run orchestration with stale-event rejection
//!
//! Rendering, audio, pinyin, persistence transports, and sync are external
//! collaborators: this crate only consumes and produces plain data records.

pub mod algorithm;
pub mod controller;
pub mod error;
pub mod queue;
pub mod session;
pub mod types;

pub use algorithm::sm2::Sm2;
pub use algorithm::{SchedulingResult, SpacedRepetitionAlgorithm};
pub use controller::{RatingOutcome, ScheduleStore, StudyController};
pub use error::{Result, SessionError};
pub use queue::select_next_due;
pub use session::StudySession;
pub use types::{Flashcard, Rating, ScheduleState, SessionStatus};
