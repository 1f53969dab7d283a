//! Multiple-choice wrong answers for a session.
//!
//! Distractors come from words outside the session. A word whose prompt
//! carries the style marker only gets marked answers, and every other word
//! only plain ones. Both pools deplete across the session, so a distractor
//! string is never shown twice in one session.

use std::collections::HashSet;

use rand::Rng;

use crate::config::StudyConfig;
use crate::domain::{SessionWord, WordItem};
use crate::error::SrsError;
#[cfg(feature = "profiling")]
use crate::profiling::EventType;
use crate::store::CatalogStore;

use super::sampling::DrawPool;

pub struct DistractorGenerator<'a> {
    catalog: &'a dyn CatalogStore,
    config: &'a StudyConfig,
}

impl<'a> DistractorGenerator<'a> {
    pub fn new(catalog: &'a dyn CatalogStore, config: &'a StudyConfig) -> Self {
        Self { catalog, config }
    }

    /// Attach `distractor_count` wrong answers to every session word
    pub fn attach<R: Rng + ?Sized>(
        &self,
        words: Vec<WordItem>,
        rng: &mut R,
    ) -> Result<Vec<SessionWord>, SrsError> {
        let ids: Vec<i64> = words.iter().map(|w| w.id).collect();
        let exclusion_pool = self.catalog.find_by_ids_excluding(&ids)?;

        let session = assign_distractors(
            words,
            &exclusion_pool,
            self.config.distractor_count,
            &self.config.style_marker,
            rng,
        )?;

        #[cfg(feature = "profiling")]
        crate::profile_log!(EventType::DistractorsAttached {
            words: session.len(),
            per_word: self.config.distractor_count,
            pool: exclusion_pool.len(),
        });

        Ok(session)
    }
}

/// Split the exclusion pool into (marked, plain) answer strings.
/// Duplicate answers collapse to one and session answers are dropped, so no
/// choice list can contain the right answer twice.
fn answer_pools(
    session: &[WordItem],
    exclusion_pool: &[WordItem],
    marker: &str,
) -> (Vec<String>, Vec<String>) {
    let correct: HashSet<&str> = session.iter().map(|w| w.answer.as_str()).collect();

    let (marked, plain): (Vec<&WordItem>, Vec<&WordItem>) = exclusion_pool
        .iter()
        .filter(|w| !correct.contains(w.answer.as_str()))
        .partition(|w| w.answer_has_marker(marker));

    (unique_answers(marked), unique_answers(plain))
}

fn unique_answers(words: Vec<&WordItem>) -> Vec<String> {
    let mut answers: Vec<String> = words.into_iter().map(|w| w.answer.clone()).collect();
    answers.sort();
    answers.dedup();
    answers
}

/// Draw `k` distractors per word from the matching pool without replacement
pub fn assign_distractors<R: Rng + ?Sized>(
    session: Vec<WordItem>,
    exclusion_pool: &[WordItem],
    k: usize,
    marker: &str,
    rng: &mut R,
) -> Result<Vec<SessionWord>, SrsError> {
    let (marked, plain) = answer_pools(&session, exclusion_pool, marker);
    let mut marked = DrawPool::new(marked);
    let mut plain = DrawPool::new(plain);

    session
        .into_iter()
        .map(|word| -> Result<SessionWord, SrsError> {
            let pool = if word.prompt_has_marker(marker) {
                &mut marked
            } else {
                &mut plain
            };
            let available = pool.len();
            let wrong_answers = pool
                .draw_exact(k, rng)
                .ok_or(SrsError::InsufficientDistractors { needed: k, available })?;
            Ok(SessionWord { word, wrong_answers })
        })
        .collect()
}
