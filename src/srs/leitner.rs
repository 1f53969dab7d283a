//! Four-box Leitner progression.
//!
//! Correct answers promote a word one box (D is the ceiling), wrong answers
//! send it back to A. A word seen for the first time lands in B or A.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{BoxEntry, BoxState, LearnerStats, LeitnerBox};
use crate::error::{SrsError, StoreError};
#[cfg(feature = "profiling")]
use crate::profiling::EventType;
use crate::store::{AnswerEffect, CatalogStore, MoveOutcome, ProgressStore};

use super::stats::StatsTracker;

/// Compare-and-set attempts before giving up on a contended move
const MOVE_ATTEMPTS: usize = 2;

/// Prune idle learner locks once the table grows past this
const LOCK_TABLE_PRUNE_AT: usize = 1024;

/// Next box for a word given its current state and the answer
pub fn advance(current: BoxState, correct: bool) -> LeitnerBox {
    if !correct {
        return LeitnerBox::A;
    }
    match current {
        BoxState::Unseen | BoxState::Filed(LeitnerBox::A) => LeitnerBox::B,
        BoxState::Filed(LeitnerBox::B) => LeitnerBox::C,
        BoxState::Filed(LeitnerBox::C) | BoxState::Filed(LeitnerBox::D) | BoxState::Orphaned => {
            LeitnerBox::D
        }
    }
}

/// One lock per learner name so progression updates never interleave
#[derive(Debug, Default)]
pub struct LearnerLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LearnerLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the learner's lock; lock it to serialize updates
    pub fn handle(&self, name: &str) -> Result<Arc<Mutex<()>>, StoreError> {
        let mut locks = self.locks.lock().map_err(|_| StoreError::Unavailable)?;

        if locks.len() > LOCK_TABLE_PRUNE_AT {
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }

        Ok(locks
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone())
    }
}

/// Result of one answer event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerOutcome {
    pub word_id: i64,
    pub from: BoxState,
    pub to: LeitnerBox,
    /// Learner accuracy after the answer; None on a first encounter, which does not count
    pub learner_stats: Option<LearnerStats>,
    pub word_hit_rate: Option<f64>,
}

/// Applies answer events to a learner's boxes and statistics
pub struct Progression<'a> {
    catalog: &'a dyn CatalogStore,
    progress: &'a dyn ProgressStore,
    locks: &'a LearnerLocks,
}

impl<'a> Progression<'a> {
    pub fn new(
        catalog: &'a dyn CatalogStore,
        progress: &'a dyn ProgressStore,
        locks: &'a LearnerLocks,
    ) -> Self {
        Self {
            catalog,
            progress,
            locks,
        }
    }

    /// Move the word according to the answer and update accuracy.
    ///
    /// The learner must already exist; progress documents are only created
    /// when a session is requested.
    ///
    /// The move, the seen mark and the learner's accuracy commit together.
    /// Word statistics are written after that commit, so if that last write
    /// fails the word has still moved and a retried answer moves it again.
    pub fn record_answer(
        &self,
        name: &str,
        word_id: i64,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<AnswerOutcome, SrsError> {
        let handle = self.locks.handle(name)?;
        let _guard = handle.lock().map_err(|_| StoreError::Unavailable)?;

        let (from, to, learner_stats) = self.move_word(name, word_id, correct, now)?;
        let word_hit_rate =
            StatsTracker::new(self.catalog, self.progress).record_word_answer(word_id, correct)?;

        Ok(AnswerOutcome {
            word_id,
            from,
            to,
            learner_stats,
            word_hit_rate,
        })
    }

    fn move_word(
        &self,
        name: &str,
        word_id: i64,
        correct: bool,
        now: DateTime<Utc>,
    ) -> Result<(BoxState, LeitnerBox, Option<LearnerStats>), SrsError> {
        for attempt in 1..=MOVE_ATTEMPTS {
            let progress = self
                .progress
                .find_by_name(name)?
                .ok_or_else(|| SrsError::LearnerNotFound(name.to_string()))?;
            // Level is re-read every time; a word may have been re-levelled since filing
            let word = self
                .catalog
                .find_by_id(word_id)?
                .ok_or(SrsError::WordNotFound(word_id))?;

            let from = progress.state_of(word_id);
            if from == BoxState::Orphaned {
                tracing::warn!(
                    "Word {} was seen by {} but not filed, treating it as box D",
                    word_id,
                    name
                );
            }
            let to = advance(from, correct);
            let entry = BoxEntry::new(word_id, to, word.level, now);
            let effect = if from == BoxState::Unseen {
                AnswerEffect::FirstSeen
            } else {
                AnswerEffect::Counted { correct }
            };

            match self.progress.apply_answer(name, from.filed_box(), &entry, effect)? {
                MoveOutcome::Moved { learner_stats } => {
                    tracing::debug!(
                        "{}: word {} {:?} -> {:?} ({})",
                        name,
                        word_id,
                        from,
                        to,
                        if correct { "correct" } else { "wrong" }
                    );
                    #[cfg(feature = "profiling")]
                    crate::profile_log!(EventType::BoxTransition {
                        learner: name.to_string(),
                        word_id,
                        from: format!("{:?}", from),
                        to: to.as_str().to_string(),
                    });
                    return Ok((from, to, learner_stats));
                }
                MoveOutcome::Conflict => tracing::warn!(
                    "Progress for {} changed under word {} (attempt {}/{})",
                    name,
                    word_id,
                    attempt,
                    MOVE_ATTEMPTS
                ),
            }
        }

        Err(SrsError::ConcurrentUpdate(name.to_string()))
    }
}
