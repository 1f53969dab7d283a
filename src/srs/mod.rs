pub mod candidates;
pub mod distractors;
pub mod leitner;
pub mod sampling;
pub mod selector;
pub mod stats;

pub use candidates::candidate_pool;
pub use distractors::{assign_distractors, DistractorGenerator};
pub use leitner::{advance, AnswerOutcome, LearnerLocks, Progression};
pub use selector::{fill_without_time_constraint, SessionSelector};
pub use stats::StatsTracker;
