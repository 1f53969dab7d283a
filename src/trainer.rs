//! Entry point used by the HTTP layer.
//!
//! Owns the two stores, the study settings and the learner lock table, and
//! builds the short-lived srs services for each call.

use std::sync::Arc;

use chrono::Utc;

use crate::config::{StudyConfig, REPORT_LIMIT};
use crate::domain::{SessionSelection, SessionWord, WordItem};
use crate::error::{SrsError, StoreError};
use crate::srs::{
    AnswerOutcome, DistractorGenerator, LearnerLocks, Progression, SessionSelector, StatsTracker,
};
use crate::store::{CatalogStore, ProgressStore, SqliteStore};

pub struct Trainer {
    catalog: Arc<dyn CatalogStore>,
    progress: Arc<dyn ProgressStore>,
    config: StudyConfig,
    locks: LearnerLocks,
}

impl Trainer {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        progress: Arc<dyn ProgressStore>,
        config: StudyConfig,
    ) -> Self {
        Self {
            catalog,
            progress,
            config,
            locks: LearnerLocks::new(),
        }
    }

    /// Both stores backed by the same SQLite database
    pub fn with_sqlite(store: SqliteStore, config: StudyConfig) -> Self {
        let store = Arc::new(store);
        Self::new(store.clone(), store, config)
    }

    pub fn select_session(&self, name: &str, level: i64) -> Result<SessionSelection, SrsError> {
        crate::profile_scope!("select_session", {
            let mut rng = rand::rng();
            SessionSelector::new(self.catalog.as_ref(), self.progress.as_ref(), &self.config)
                .select(name, level, Utc::now(), &mut rng)
        })
    }

    /// Session words only, for clients that build their own choices
    pub fn session_words(&self, name: &str, level: i64) -> Result<Vec<WordItem>, SrsError> {
        Ok(self.select_session(name, level)?.words)
    }

    /// Session words each carrying `distractor_count` wrong answers
    pub fn session_with_distractors(
        &self,
        name: &str,
        level: i64,
    ) -> Result<Vec<SessionWord>, SrsError> {
        let selection = self.select_session(name, level)?;
        let mut rng = rand::rng();
        DistractorGenerator::new(self.catalog.as_ref(), &self.config).attach(selection.words, &mut rng)
    }

    pub fn record_answer(
        &self,
        name: &str,
        word_id: i64,
        correct: bool,
    ) -> Result<AnswerOutcome, SrsError> {
        Progression::new(self.catalog.as_ref(), self.progress.as_ref(), &self.locks).record_answer(
            name,
            word_id,
            correct,
            Utc::now(),
        )
    }

    pub fn hardest_words(&self, level: Option<i64>) -> Result<Vec<WordItem>, StoreError> {
        self.stats().hardest_words(REPORT_LIMIT, level)
    }

    pub fn easiest_words(&self, level: Option<i64>) -> Result<Vec<WordItem>, StoreError> {
        self.stats().easiest_words(REPORT_LIMIT, level)
    }

    pub fn average_learner_hit_rate(&self) -> Result<Option<f64>, StoreError> {
        self.stats().average_learner_hit_rate()
    }

    fn stats(&self) -> StatsTracker<'_> {
        StatsTracker::new(self.catalog.as_ref(), self.progress.as_ref())
    }
}
