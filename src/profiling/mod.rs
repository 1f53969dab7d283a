//! Scheduling event log, compiled in with the `profiling` feature.
//!
//! With the feature on, session selections, box transitions and distractor
//! draws are appended to a JSONL file under `data/`. Without it every entry
//! point is an empty inline function and the macros expand to nothing.
//!
//! ```ignore
//! use leitner_words::profile_log;
//! use leitner_words::profiling::EventType;
//!
//! profile_log!(EventType::BoxTransition {
//!     learner: "Test1".into(),
//!     word_id: 42,
//!     from: "Unseen".into(),
//!     to: "B".into(),
//! });
//! ```

#[cfg(feature = "profiling")]
mod event;
#[cfg(feature = "profiling")]
mod logger;

#[cfg(feature = "profiling")]
pub use event::*;
#[cfg(feature = "profiling")]
pub use logger::*;

#[cfg(not(feature = "profiling"))]
mod noop;
#[cfg(not(feature = "profiling"))]
pub use noop::*;

/// Log a profiling event; expands to nothing without the feature.
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_log {
    ($event_type:expr) => {
        $crate::profiling::log_event($event_type)
    };
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_log {
    ($($args:tt)*) => {};
}

/// Run a block and log how long it took. Without the feature it only runs the block.
#[cfg(feature = "profiling")]
#[macro_export]
macro_rules! profile_scope {
    ($name:expr, $body:block) => {{
        let _start = std::time::Instant::now();
        let result = $body;
        $crate::profiling::log_timed($name, _start.elapsed());
        result
    }};
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($name:expr, $body:block) => {
        $body
    };
}
