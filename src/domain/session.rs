use serde::Serialize;

use super::word::WordItem;

/// A practice word with its multiple-choice wrong answers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionWord {
    #[serde(flatten)]
    pub word: WordItem,
    pub wrong_answers: Vec<String>,
}

/// Words picked for one session. May be shorter than requested when the
/// catalog or the learner's boxes run out.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSelection {
    pub words: Vec<WordItem>,
    pub requested: usize,
}

impl SessionSelection {
    pub fn new(words: Vec<WordItem>, requested: usize) -> Self {
        Self { words, requested }
    }

    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.words.len())
    }

    pub fn is_short(&self) -> bool {
        self.shortfall() > 0
    }

    pub fn ids(&self) -> Vec<i64> {
        self.words.iter().map(|w| w.id).collect()
    }
}
