//! Store interfaces consumed by the scheduling core.
//!
//! The core never holds on to a word or a progress document between calls:
//! every operation re-fetches through these traits and writes back explicitly.

mod sqlite;

pub use crate::db::{AnswerEffect, MoveOutcome, RankOrder};
pub use sqlite::SqliteStore;

use crate::domain::{BoxEntry, LearnerProgress, LeitnerBox, WordItem};
use crate::error::StoreError;

/// Vocabulary catalog keyed by word id
pub trait CatalogStore: Send + Sync {
    fn find_by_id(&self, id: i64) -> Result<Option<WordItem>, StoreError>;

    fn find_by_level_at_most(&self, level: i64) -> Result<Vec<WordItem>, StoreError>;

    /// Words for the given ids; unknown ids are skipped, order is unspecified
    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<WordItem>, StoreError>;

    /// Every word whose id is not in `ids`
    fn find_by_ids_excluding(&self, ids: &[i64]) -> Result<Vec<WordItem>, StoreError>;

    /// Count one answer and refresh the hit rate as a single atomic write.
    /// Returns the updated word, or None for an unknown id.
    fn record_answer(&self, id: i64, correct: bool) -> Result<Option<WordItem>, StoreError>;

    /// Words with a defined hit rate, ranked, optionally limited to one level
    fn ranked_by_hit_rate(
        &self,
        order: RankOrder,
        limit: usize,
        level: Option<i64>,
    ) -> Result<Vec<WordItem>, StoreError>;
}

/// Per-learner progress documents keyed by name
pub trait ProgressStore: Send + Sync {
    fn find_by_name(&self, name: &str) -> Result<Option<LearnerProgress>, StoreError>;

    /// Create an empty progress document; an existing one is returned unchanged
    fn create(&self, name: &str) -> Result<LearnerProgress, StoreError>;

    /// Replace the word's entry in `from` with `entry` and apply `effect`,
    /// all or nothing.
    ///
    /// Returns `Conflict` when the word is no longer in `from` (or is already
    /// filed, for `None`), leaving the document untouched.
    fn apply_answer(
        &self,
        name: &str,
        from: Option<LeitnerBox>,
        entry: &BoxEntry,
        effect: AnswerEffect,
    ) -> Result<MoveOutcome, StoreError>;

    /// Mean hit rate over learners with a defined hit rate
    fn average_hit_rate(&self) -> Result<Option<f64>, StoreError>;
}
