//! Error types for the stores and the scheduling core

use thiserror::Error;

/// Failures raised by a catalog or progress store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database unavailable")]
    Unavailable,
}

/// Failures raised by session selection and progression
#[derive(Error, Debug)]
pub enum SrsError {
    #[error("Learner not found: {0}")]
    LearnerNotFound(String),

    #[error("Word not found: {0}")]
    WordNotFound(i64),

    #[error("Not enough distractors: needed {needed}, {available} left")]
    InsufficientDistractors { needed: usize, available: usize },

    #[error("Progress for {0} changed while updating, try again")]
    ConcurrentUpdate(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}
