pub mod progress;
pub mod session;
pub mod word;

pub use progress::{BoxEntry, BoxState, LearnerProgress, LearnerStats, LeitnerBox};
pub use session::{SessionSelection, SessionWord};
pub use word::{hit_rate, NewWord, WordItem, HIT_RATE_UNDEFINED};
