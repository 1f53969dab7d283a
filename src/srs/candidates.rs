//! Box-resident words that are due for review.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::StudyConfig;
use crate::domain::{BoxEntry, LearnerProgress, LeitnerBox};

/// Whole calendar days between the filing date and `today` (UTC), time of day ignored
pub fn days_since(entered_at: DateTime<Utc>, today: NaiveDate) -> i64 {
    (today - entered_at.date_naive()).num_days().abs()
}

/// How many days a word must rest in a box before it is due again
pub fn min_age_days(leitner_box: LeitnerBox, config: &StudyConfig) -> i64 {
    match leitner_box {
        LeitnerBox::A => 0,
        LeitnerBox::B => config.week_threshold_days,
        LeitnerBox::C => 2 * config.week_threshold_days,
        LeitnerBox::D => config.month_threshold_days,
    }
}

pub fn within_level(entry: &BoxEntry, level: i64) -> bool {
    entry.level <= level
}

pub fn is_due(entry: &BoxEntry, level: i64, today: NaiveDate, config: &StudyConfig) -> bool {
    within_level(entry, level)
        && days_since(entry.entered_at, today) >= min_age_days(entry.leitner_box, config)
}

/// Due entries in box order A, B, C, D
pub fn candidate_pool(
    progress: &LearnerProgress,
    level: i64,
    today: NaiveDate,
    config: &StudyConfig,
) -> Vec<BoxEntry> {
    LeitnerBox::ALL
        .iter()
        .flat_map(|&b| progress.box_entries(b))
        .filter(|e| is_due(e, level, today, config))
        .cloned()
        .collect()
}
