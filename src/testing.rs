//! Test fixtures backed by a temporary SQLite database.
//!
//! Uses the real `init_db`, so tests run against the production schema.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tempfile::TempDir;

use crate::db::{self, DbPool};
use crate::domain::{BoxEntry, LeitnerBox, NewWord};
use crate::store::SqliteStore;

/// Temporary SQLite database with the full schema applied.
///
/// The directory is removed when the environment is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    pub pool: DbPool,
    pub store: Arc<SqliteStore>,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let pool = db::init_db(&temp.path().join("leitner.db")).expect("init test database");
        let store = Arc::new(SqliteStore::new(pool.clone()));
        Self { temp, pool, store }
    }

    pub fn add_word(&self, prompt: &str, answer: &str, level: i64) -> i64 {
        let conn = db::try_lock(&self.pool).expect("lock test database");
        db::insert_word(
            &conn,
            &NewWord {
                id: None,
                prompt: prompt.to_string(),
                answer: answer.to_string(),
                level,
            },
        )
        .expect("insert word")
    }

    /// Add `count` plain words at `level`, returning their ids.
    /// Prompts and answers are unique across the whole catalog.
    pub fn add_words(&self, count: usize, level: i64) -> Vec<i64> {
        let start = {
            let conn = db::try_lock(&self.pool).expect("lock test database");
            db::count_words(&conn).expect("count words")
        };
        (0..count as i64)
            .map(|i| {
                self.add_word(
                    &format!("prompt-{}-{}", level, start + i),
                    &format!("answer-{}-{}", level, start + i),
                    level,
                )
            })
            .collect()
    }

    pub fn add_learner(&self, name: &str) {
        let conn = db::try_lock(&self.pool).expect("lock test database");
        db::insert_learner(&conn, name).expect("insert learner");
    }

    /// File a word directly into a box and mark it seen
    pub fn file_word(
        &self,
        name: &str,
        word_id: i64,
        leitner_box: LeitnerBox,
        level: i64,
        entered_at: DateTime<Utc>,
    ) {
        let conn = db::try_lock(&self.pool).expect("lock test database");
        db::insert_learner(&conn, name).expect("insert learner");
        let entry = BoxEntry::new(word_id, leitner_box, level, entered_at);
        let outcome = db::apply_answer(&conn, name, None, &entry, db::AnswerEffect::FirstSeen)
            .expect("file word");
        assert_eq!(outcome, db::MoveOutcome::Moved { learner_stats: None });
    }
}
