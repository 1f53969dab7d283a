use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::word::hit_rate;

/// Review tier. A is the most due, D the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeitnerBox {
    A,
    B,
    C,
    D,
}

impl LeitnerBox {
    /// Priority order used whenever boxes are scanned
    pub const ALL: [LeitnerBox; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "A" | "a" => Some(Self::A),
            "B" | "b" => Some(Self::B),
            "C" | "c" => Some(Self::C),
            "D" | "d" => Some(Self::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// Where a word currently sits for one learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "box", rename_all = "snake_case")]
pub enum BoxState {
    /// Never shown to the learner
    Unseen,
    Filed(LeitnerBox),
    /// Seen but not filed in any box; progresses as if it were in D
    Orphaned,
}

impl BoxState {
    /// The box a word is filed in, if any
    pub fn filed_box(&self) -> Option<LeitnerBox> {
        match self {
            Self::Filed(b) => Some(*b),
            Self::Unseen | Self::Orphaned => None,
        }
    }
}

/// A word filed in a learner's box. Replaced on every transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxEntry {
    pub word_id: i64,
    pub leitner_box: LeitnerBox,
    /// Copy of the word's catalog level at the time of filing
    pub level: i64,
    pub entered_at: DateTime<Utc>,
}

impl BoxEntry {
    pub fn new(word_id: i64, leitner_box: LeitnerBox, level: i64, entered_at: DateTime<Utc>) -> Self {
        Self {
            word_id,
            leitner_box,
            level,
            entered_at,
        }
    }
}

/// Aggregate accuracy for a learner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct LearnerStats {
    pub times_appeared: i64,
    pub correct_answered: i64,
    pub hit_rate: Option<f64>,
}

impl LearnerStats {
    /// Count one answer to an already-seen word
    pub fn record(&mut self, correct: bool) {
        self.times_appeared += 1;
        if correct {
            self.correct_answered += 1;
        }
        self.hit_rate = hit_rate(self.correct_answered, self.times_appeared);
    }
}

/// One learner's boxes, seen set and accuracy
#[derive(Debug, Clone, PartialEq)]
pub struct LearnerProgress {
    pub name: String,
    /// All filed words, ordered by box then filing time
    pub entries: Vec<BoxEntry>,
    pub seen: HashSet<i64>,
    pub stats: LearnerStats,
}

impl LearnerProgress {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
            seen: HashSet::new(),
            stats: LearnerStats::default(),
        }
    }

    pub fn box_entries(&self, leitner_box: LeitnerBox) -> impl Iterator<Item = &BoxEntry> {
        self.entries
            .iter()
            .filter(move |e| e.leitner_box == leitner_box)
    }

    pub fn entry_for(&self, word_id: i64) -> Option<&BoxEntry> {
        self.entries.iter().find(|e| e.word_id == word_id)
    }

    pub fn has_seen(&self, word_id: i64) -> bool {
        self.seen.contains(&word_id)
    }

    /// Current state of a word; a filed box always wins over the seen set
    pub fn state_of(&self, word_id: i64) -> BoxState {
        if let Some(entry) = self.entry_for(word_id) {
            BoxState::Filed(entry.leitner_box)
        } else if self.has_seen(word_id) {
            BoxState::Orphaned
        } else {
            BoxState::Unseen
        }
    }
}
