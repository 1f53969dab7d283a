use crate::db::{self, AnswerEffect, DbPool, MoveOutcome, RankOrder};
use crate::domain::{BoxEntry, LearnerProgress, LeitnerBox, WordItem};
use crate::error::StoreError;

use super::{CatalogStore, ProgressStore};

/// Both stores backed by one shared SQLite connection
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CatalogStore for SqliteStore {
    fn find_by_id(&self, id: i64) -> Result<Option<WordItem>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::get_word_by_id(&conn, id)?)
    }

    fn find_by_level_at_most(&self, level: i64) -> Result<Vec<WordItem>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::get_words_up_to_level(&conn, level)?)
    }

    fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<WordItem>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::get_words_by_ids(&conn, ids)?)
    }

    fn find_by_ids_excluding(&self, ids: &[i64]) -> Result<Vec<WordItem>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::get_words_excluding_ids(&conn, ids)?)
    }

    fn record_answer(&self, id: i64, correct: bool) -> Result<Option<WordItem>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::record_word_answer(&conn, id, correct)?)
    }

    fn ranked_by_hit_rate(
        &self,
        order: RankOrder,
        limit: usize,
        level: Option<i64>,
    ) -> Result<Vec<WordItem>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::get_ranked_words(&conn, order, limit, level)?)
    }
}

impl ProgressStore for SqliteStore {
    fn find_by_name(&self, name: &str) -> Result<Option<LearnerProgress>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::get_learner(&conn, name)?)
    }

    fn create(&self, name: &str) -> Result<LearnerProgress, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        db::insert_learner(&conn, name)?;
        let progress = db::get_learner(&conn, name)?;
        Ok(progress.unwrap_or_else(|| LearnerProgress::new(name)))
    }

    fn apply_answer(
        &self,
        name: &str,
        from: Option<LeitnerBox>,
        entry: &BoxEntry,
        effect: AnswerEffect,
    ) -> Result<MoveOutcome, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::apply_answer(&conn, name, from, entry, effect)?)
    }

    fn average_hit_rate(&self) -> Result<Option<f64>, StoreError> {
        let conn = db::try_lock(&self.pool)?;
        Ok(db::average_learner_hit_rate(&conn)?)
    }
}
