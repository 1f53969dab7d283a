//! Session assembly from due words, never-seen words and a fallback.
//!
//! A known learner's session is built in up to three passes:
//! 1. Due words from the boxes (see `candidates`)
//! 2. Never-seen words at or below the requested level
//! 3. If still short, box B/C/D words that are not yet due

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::StudyConfig;
use crate::domain::{LearnerProgress, LeitnerBox, SessionSelection, WordItem};
use crate::error::{SrsError, StoreError};
#[cfg(feature = "profiling")]
use crate::profiling::EventType;
use crate::store::{CatalogStore, ProgressStore};

use super::candidates::{candidate_pool, within_level};
use super::sampling::{sample, DrawPool};

/// Boxes the fallback draws from, in order. A is always fully due, so it is never needed.
const FALLBACK_BOXES: [LeitnerBox; 3] = [LeitnerBox::B, LeitnerBox::C, LeitnerBox::D];

pub struct SessionSelector<'a> {
    catalog: &'a dyn CatalogStore,
    progress: &'a dyn ProgressStore,
    config: &'a StudyConfig,
}

impl<'a> SessionSelector<'a> {
    pub fn new(
        catalog: &'a dyn CatalogStore,
        progress: &'a dyn ProgressStore,
        config: &'a StudyConfig,
    ) -> Self {
        Self {
            catalog,
            progress,
            config,
        }
    }

    /// Pick up to `session_size` distinct words for the learner at or below `level`.
    ///
    /// An unknown learner is created on the spot and gets a random cold-start
    /// session. The result is short only when not enough words exist.
    pub fn select<R: Rng + ?Sized>(
        &self,
        name: &str,
        level: i64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<SessionSelection, SrsError> {
        let size = self.config.session_size;

        let selection = match self.progress.find_by_name(name)? {
            None => {
                self.progress.create(name)?;
                tracing::info!("Created progress for new learner {}", name);
                let words = self.catalog.find_by_level_at_most(level)?;
                SessionSelection::new(sample(&words, size, rng), size)
            }
            Some(progress) => {
                let ids = self.pick_ids(&progress, level, now, rng)?;
                SessionSelection::new(self.fetch_in_order(&ids)?, size)
            }
        };

        if selection.is_short() {
            tracing::warn!(
                "Short session for {} at level {}: {} of {} words",
                name,
                level,
                selection.words.len(),
                size
            );
        }
        #[cfg(feature = "profiling")]
        crate::profile_log!(EventType::SessionSelected {
            learner: name.to_string(),
            level,
            words: selection.words.len(),
            shortfall: selection.shortfall(),
        });

        Ok(selection)
    }

    fn pick_ids<R: Rng + ?Sized>(
        &self,
        progress: &LearnerProgress,
        level: i64,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<i64>, StoreError> {
        let size = self.config.session_size;
        let pool: Vec<i64> = candidate_pool(progress, level, now.date_naive(), self.config)
            .iter()
            .map(|e| e.word_id)
            .collect();
        let unseen = self.unseen_ids(progress, level)?;
        let due = pool.len();

        let mut chosen = if pool.len() >= size {
            let mut chosen = sample(&unseen, self.config.unseen_cap.min(size), rng);
            let mut pool = DrawPool::new(pool);
            chosen.extend(pool.draw_up_to(size - chosen.len(), rng));
            chosen
        } else {
            let mut chosen = sample(&unseen, size - pool.len(), rng);
            chosen.extend(pool);
            chosen
        };
        dedup_in_order(&mut chosen);

        if chosen.len() < size {
            let exclude: HashSet<i64> = chosen.iter().copied().collect();
            chosen.extend(fill_without_time_constraint(
                progress,
                size - chosen.len(),
                &exclude,
                level,
                rng,
            ));
        }

        tracing::debug!(
            "{}: {} due, {} unseen available, {} chosen",
            progress.name,
            due,
            unseen.len(),
            chosen.len()
        );
        Ok(chosen)
    }

    /// Ids of words at or below `level` the learner has never been shown
    fn unseen_ids(&self, progress: &LearnerProgress, level: i64) -> Result<Vec<i64>, StoreError> {
        Ok(self
            .catalog
            .find_by_level_at_most(level)?
            .into_iter()
            .map(|w| w.id)
            .filter(|id| !progress.has_seen(*id))
            .collect())
    }

    /// Re-read the chosen words so text and statistics are current; keeps the chosen order
    fn fetch_in_order(&self, ids: &[i64]) -> Result<Vec<WordItem>, StoreError> {
        let mut by_id: HashMap<i64, WordItem> = self
            .catalog
            .find_by_ids(ids)?
            .into_iter()
            .map(|w| (w.id, w))
            .collect();

        Ok(ids
            .iter()
            .filter_map(|id| {
                let word = by_id.remove(id);
                if word.is_none() {
                    tracing::warn!("Word {} left the catalog during selection", id);
                }
                word
            })
            .collect())
    }
}

/// Top up a short session from boxes B, C then D, ignoring how recently the
/// words were filed. Level limit and exclusions still apply. May return
/// fewer than `remaining` ids when the boxes run out.
pub fn fill_without_time_constraint<R: Rng + ?Sized>(
    progress: &LearnerProgress,
    remaining: usize,
    exclude: &HashSet<i64>,
    level: i64,
    rng: &mut R,
) -> Vec<i64> {
    let mut filled = Vec::with_capacity(remaining);

    for leitner_box in FALLBACK_BOXES {
        let still_needed = remaining - filled.len();
        if still_needed == 0 {
            break;
        }
        let eligible: Vec<i64> = progress
            .box_entries(leitner_box)
            .filter(|e| within_level(e, level) && !exclude.contains(&e.word_id))
            .map(|e| e.word_id)
            .collect();
        filled.extend(sample(&eligible, still_needed, rng));
    }

    filled
}

fn dedup_in_order(ids: &mut Vec<i64>) {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.retain(|id| seen.insert(*id));
}
