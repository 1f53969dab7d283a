//! Accuracy bookkeeping and difficulty reports.
//!
//! Hit rates rank words by difficulty for the dashboard; they never feed
//! back into session selection.

use crate::domain::WordItem;
use crate::error::{SrsError, StoreError};
use crate::store::{CatalogStore, ProgressStore, RankOrder};

pub struct StatsTracker<'a> {
    catalog: &'a dyn CatalogStore,
    progress: &'a dyn ProgressStore,
}

impl<'a> StatsTracker<'a> {
    pub fn new(catalog: &'a dyn CatalogStore, progress: &'a dyn ProgressStore) -> Self {
        Self { catalog, progress }
    }

    /// Count an answer against the word, first encounters included.
    /// Returns the word's new hit rate.
    ///
    /// Word statistics are shared by every learner, so the counts and the
    /// rate are written by the store in one step.
    pub fn record_word_answer(&self, word_id: i64, correct: bool) -> Result<Option<f64>, SrsError> {
        let word = self
            .catalog
            .record_answer(word_id, correct)?
            .ok_or(SrsError::WordNotFound(word_id))?;
        Ok(word.hit_rate)
    }

    /// Lowest hit rates first; words nobody has answered are left out
    pub fn hardest_words(&self, limit: usize, level: Option<i64>) -> Result<Vec<WordItem>, StoreError> {
        self.catalog.ranked_by_hit_rate(RankOrder::Hardest, limit, level)
    }

    /// Highest hit rates first; words nobody has answered are left out
    pub fn easiest_words(&self, limit: usize, level: Option<i64>) -> Result<Vec<WordItem>, StoreError> {
        self.catalog.ranked_by_hit_rate(RankOrder::Easiest, limit, level)
    }

    /// Mean of every defined learner hit rate
    pub fn average_learner_hit_rate(&self) -> Result<Option<f64>, StoreError> {
        self.progress.average_hit_rate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;
    use std::thread;

    fn tracker(env: &TestEnv) -> StatsTracker<'_> {
        StatsTracker::new(env.store.as_ref(), env.store.as_ref())
    }

    #[test]
    fn test_record_word_answer_updates_rate() {
        let env = TestEnv::new();
        let word = env.add_word("gato", "cat", 1);
        let stats = tracker(&env);

        assert_eq!(stats.record_word_answer(word, true).unwrap(), Some(1.0));
        assert_eq!(stats.record_word_answer(word, false).unwrap(), Some(0.5));
        assert_eq!(stats.record_word_answer(word, false).unwrap(), Some(1.0 / 3.0));

        let item = env.store.find_by_id(word).unwrap().unwrap();
        assert_eq!(item.appear_count, 3);
        assert_eq!(item.correct_count, 1);
    }

    #[test]
    fn test_record_word_answer_unknown_word() {
        let env = TestEnv::new();
        let err = tracker(&env).record_word_answer(9, true).unwrap_err();
        assert!(matches!(err, SrsError::WordNotFound(9)));
    }

    #[test]
    fn test_word_rate_matches_counts_under_concurrent_answers() {
        let env = TestEnv::new();
        let word = env.add_word("gato", "cat", 1);

        thread::scope(|s| {
            for learner in 0..4 {
                let store = env.store.clone();
                s.spawn(move || {
                    let stats = StatsTracker::new(store.as_ref(), store.as_ref());
                    for i in 0..25 {
                        let rate = stats.record_word_answer(word, (learner + i) % 2 == 0).unwrap();
                        assert!(rate.is_some());
                    }
                });
            }
        });

        let item = env.store.find_by_id(word).unwrap().unwrap();
        assert_eq!(item.appear_count, 100);
        assert_eq!(item.correct_count, 50);
        assert_eq!(item.hit_rate, Some(0.5));
    }

    #[test]
    fn test_rankings() {
        let env = TestEnv::new();
        let easy = env.add_word("sí", "yes", 1);
        let hard = env.add_word("ferrocarril", "railway", 2);
        let never = env.add_word("nunca", "never", 1);
        let stats = tracker(&env);

        stats.record_word_answer(easy, true).unwrap();
        stats.record_word_answer(hard, false).unwrap();
        stats.record_word_answer(hard, true).unwrap();

        let hardest: Vec<i64> = stats.hardest_words(10, None).unwrap().iter().map(|w| w.id).collect();
        assert_eq!(hardest, vec![hard, easy]);
        assert!(!hardest.contains(&never));

        let easiest: Vec<i64> = stats.easiest_words(1, None).unwrap().iter().map(|w| w.id).collect();
        assert_eq!(easiest, vec![easy]);

        let level_two: Vec<i64> = stats.easiest_words(10, Some(2)).unwrap().iter().map(|w| w.id).collect();
        assert_eq!(level_two, vec![hard]);
    }

    #[test]
    fn test_average_learner_hit_rate() {
        let env = TestEnv::new();
        let stats = tracker(&env);
        assert_eq!(stats.average_learner_hit_rate().unwrap(), None);

        env.add_learner("a");
        env.add_learner("b");
        {
            let conn = crate::db::try_lock(&env.pool).unwrap();
            crate::db::record_learner_answer(&conn, "a", true).unwrap();
            crate::db::record_learner_answer(&conn, "b", true).unwrap();
            crate::db::record_learner_answer(&conn, "b", false).unwrap();
        }

        let avg = stats.average_learner_hit_rate().unwrap().unwrap();
        assert!((avg - 0.75).abs() < f64::EPSILON);
    }
}
