pub mod learners;
pub mod schema;
pub mod words;

use rusqlite::{Connection, Result};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::NewWord;
use crate::error::StoreError;

// Re-export all public items from submodules
pub use learners::*;
pub use schema::run_migrations;
pub use words::*;

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }
}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, StoreError> {
    pool.lock().map_err(|_: PoisonError<_>| {
        tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
        StoreError::Unavailable
    })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Error raised while seeding the catalog from a file
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Could not read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed seed file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Fill an empty catalog from a JSON array of words. Returns how many were inserted.
pub fn seed_words(conn: &Connection, seed_path: &Path) -> std::result::Result<usize, SeedError> {
    if count_words(conn)? > 0 {
        return Ok(0);
    }

    let contents = std::fs::read_to_string(seed_path)?;
    let words: Vec<NewWord> = serde_json::from_str(&contents)?;

    let tx = conn.unchecked_transaction()?;
    for word in &words {
        insert_word(&tx, word)?;
    }
    tx.commit()?;

    tracing::info!("Seeded {} words from {}", words.len(), seed_path.display());
    Ok(words.len())
}
