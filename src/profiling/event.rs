//! Profiling event records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One line of the profile log
#[derive(Serialize)]
pub struct ProfileEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: EventType,
    /// Microseconds, only for timed scopes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_us: Option<u64>,
}

impl ProfileEvent {
    pub fn new(event_type: EventType) -> Self {
        Self {
            timestamp: Utc::now(),
            event_type,
            duration_us: None,
        }
    }

    pub fn with_duration(event_type: EventType, duration: std::time::Duration) -> Self {
        Self {
            duration_us: Some(duration.as_micros() as u64),
            ..Self::new(event_type)
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventType {
    // Profiler lifecycle
    SessionStart {
        session_id: String,
    },
    SessionEnd {
        total_events: u64,
    },

    DbQuery {
        operation: String,
        table: String,
    },

    // Scheduling
    /// A study session was assembled
    SessionSelected {
        learner: String,
        level: i64,
        words: usize,
        /// Words missing from a full session, 0 when full
        shortfall: usize,
    },
    /// A word moved between boxes after an answer
    BoxTransition {
        learner: String,
        word_id: i64,
        from: String,
        to: String,
    },
    DistractorsAttached {
        words: usize,
        per_word: usize,
        /// Candidate words outside the session
        pool: usize,
    },

    TimedScope {
        name: String,
    },
}
