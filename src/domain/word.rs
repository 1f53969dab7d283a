use serde::{Deserialize, Serialize};

/// Stored in place of a hit rate when a word or learner has no answers yet
pub const HIT_RATE_UNDEFINED: f64 = -1.0;

/// Correct-answer ratio, `None` until something has been answered
pub fn hit_rate(correct: i64, appeared: i64) -> Option<f64> {
    if appeared > 0 {
        Some(correct as f64 / appeared as f64)
    } else {
        None
    }
}

/// A vocabulary item from the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordItem {
    pub id: i64,
    pub prompt: String,
    pub answer: String,
    /// Lesson the word belongs to; sessions are scoped to "at most this level"
    pub level: i64,
    pub correct_count: i64,
    pub appear_count: i64,
    /// Catalog-wide accuracy, `None` until the word has been answered
    pub hit_rate: Option<f64>,
}

impl WordItem {
    pub fn new(id: i64, prompt: &str, answer: &str, level: i64) -> Self {
        Self {
            id,
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            level,
            correct_count: 0,
            appear_count: 0,
            hit_rate: None,
        }
    }

    /// Whether the given marker appears in the prompt (question-format items)
    pub fn prompt_has_marker(&self, marker: &str) -> bool {
        !marker.is_empty() && self.prompt.contains(marker)
    }

    pub fn answer_has_marker(&self, marker: &str) -> bool {
        !marker.is_empty() && self.answer.contains(marker)
    }
}

/// A catalog entry to be inserted, as read from a seed file
#[derive(Debug, Clone, Deserialize)]
pub struct NewWord {
    /// Explicit id; assigned by the database when absent
    #[serde(default)]
    pub id: Option<i64>,
    pub prompt: String,
    pub answer: String,
    pub level: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_undefined_without_answers() {
        assert_eq!(hit_rate(0, 0), None);
    }

    #[test]
    fn test_hit_rate_ratio() {
        assert_eq!(hit_rate(1, 1), Some(1.0));
        assert_eq!(hit_rate(1, 4), Some(0.25));
        assert_eq!(hit_rate(0, 3), Some(0.0));
    }

    #[test]
    fn test_marker_checks() {
        let word = WordItem::new(1, "Which word means 'dog'?", "perro", 1);
        assert!(word.prompt_has_marker("?"));
        assert!(!word.answer_has_marker("?"));
        // An empty marker never matches
        assert!(!word.prompt_has_marker(""));
    }

    #[test]
    fn test_new_word_deserialize_without_id() {
        let word: NewWord =
            serde_json::from_str(r#"{"prompt": "gato", "answer": "cat", "level": 2}"#).unwrap();
        assert!(word.id.is_none());
        assert_eq!(word.level, 2);
    }
}
