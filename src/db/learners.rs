//! Learner progress: box entries, seen words and aggregate accuracy

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result};

use crate::domain::{BoxEntry, LearnerProgress, LearnerStats, LeitnerBox, HIT_RATE_UNDEFINED};
#[cfg(feature = "profiling")]
use crate::profiling::EventType;

pub fn insert_learner(conn: &Connection, name: &str) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO learners (name) VALUES (?1)",
        params![name],
    )?;
    Ok(())
}

pub fn get_learner_stats(conn: &Connection, name: &str) -> Result<Option<LearnerStats>> {
    conn.query_row(
        "SELECT times_appeared, correct_answered, hit_rate FROM learners WHERE name = ?1",
        params![name],
        |row| {
            let hit_rate: f64 = row.get(2)?;
            Ok(LearnerStats {
                times_appeared: row.get(0)?,
                correct_answered: row.get(1)?,
                hit_rate: if hit_rate < 0.0 { None } else { Some(hit_rate) },
            })
        },
    )
    .optional()
}

/// Load a learner's full progress document
pub fn get_learner(conn: &Connection, name: &str) -> Result<Option<LearnerProgress>> {
    #[cfg(feature = "profiling")]
    crate::profile_log!(EventType::DbQuery {
        operation: "select".into(),
        table: "learners".into(),
    });

    let Some(stats) = get_learner_stats(conn, name)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare(
        r#"
    SELECT word_id, box, level, entered_at
    FROM box_entries
    WHERE learner = ?1
    ORDER BY box ASC, entered_at ASC, word_id ASC
    "#,
    )?;
    let entries = stmt
        .query_map(params![name], row_to_entry)?
        .collect::<Result<Vec<_>>>()?;

    let mut stmt = conn.prepare("SELECT word_id FROM seen_words WHERE learner = ?1")?;
    let seen = stmt
        .query_map(params![name], |row| row.get::<_, i64>(0))?
        .collect::<Result<HashSet<_>>>()?;

    Ok(Some(LearnerProgress {
        name: name.to_string(),
        entries,
        seen,
        stats,
    }))
}

/// What an answer does to the learner's record besides moving the word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerEffect {
    /// First encounter: the word joins the seen set, accuracy is untouched
    FirstSeen,
    /// The answer counts toward the learner's accuracy
    Counted { correct: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MoveOutcome {
    /// Learner stats are set for a counted answer
    Moved { learner_stats: Option<LearnerStats> },
    /// The word was no longer where the caller saw it; nothing was written
    Conflict,
}

/// Apply every learner-side write of one answer in a single transaction:
/// the compare-and-set move, then the seen mark or the accuracy update.
pub fn apply_answer(
    conn: &Connection,
    name: &str,
    from: Option<LeitnerBox>,
    entry: &BoxEntry,
    effect: AnswerEffect,
) -> Result<MoveOutcome> {
    let tx = conn.unchecked_transaction()?;
    if !file_entry(&tx, name, from, entry)? {
        return Ok(MoveOutcome::Conflict);
    }

    let learner_stats = match effect {
        AnswerEffect::FirstSeen => {
            mark_word_seen(&tx, name, entry.word_id)?;
            None
        }
        // The box entry above already required the learner row
        AnswerEffect::Counted { correct } => Some(
            record_learner_answer(&tx, name, correct)?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?,
        ),
    };

    tx.commit()?;
    Ok(MoveOutcome::Moved { learner_stats })
}

/// Compare-and-set: false without changing anything when the word is not
/// currently in `from` (or, for `None`, is already filed somewhere)
fn file_entry(
    conn: &Connection,
    name: &str,
    from: Option<LeitnerBox>,
    entry: &BoxEntry,
) -> Result<bool> {
    if let Some(from_box) = from {
        let removed = conn.execute(
            "DELETE FROM box_entries WHERE learner = ?1 AND word_id = ?2 AND box = ?3",
            params![name, entry.word_id, from_box.as_str()],
        )?;
        if removed == 0 {
            return Ok(false);
        }
    }

    let inserted = conn.execute(
        r#"
    INSERT OR IGNORE INTO box_entries (learner, word_id, box, level, entered_at)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![
            name,
            entry.word_id,
            entry.leitner_box.as_str(),
            entry.level,
            entry.entered_at.to_rfc3339(),
        ],
    )?;
    Ok(inserted > 0)
}

pub fn mark_word_seen(conn: &Connection, name: &str, word_id: i64) -> Result<()> {
    conn.execute(
        "INSERT OR IGNORE INTO seen_words (learner, word_id) VALUES (?1, ?2)",
        params![name, word_id],
    )?;
    Ok(())
}

/// Count one answer against the learner's aggregate accuracy
pub fn record_learner_answer(
    conn: &Connection,
    name: &str,
    correct: bool,
) -> Result<Option<LearnerStats>> {
    let Some(mut stats) = get_learner_stats(conn, name)? else {
        return Ok(None);
    };
    stats.record(correct);

    conn.execute(
        r#"
    UPDATE learners
    SET times_appeared = ?1, correct_answered = ?2, hit_rate = ?3
    WHERE name = ?4
    "#,
        params![
            stats.times_appeared,
            stats.correct_answered,
            stats.hit_rate.unwrap_or(HIT_RATE_UNDEFINED),
            name,
        ],
    )?;
    Ok(Some(stats))
}

/// Mean hit rate over learners that have answered anything
pub fn average_learner_hit_rate(conn: &Connection) -> Result<Option<f64>> {
    conn.query_row(
        "SELECT AVG(hit_rate) FROM learners WHERE hit_rate >= 0",
        [],
        |row| row.get(0),
    )
}

fn row_to_entry(row: &rusqlite::Row) -> Result<BoxEntry> {
    let box_str: String = row.get(1)?;
    let entered_at_str: String = row.get(3)?;

    let leitner_box = LeitnerBox::from_str(&box_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown box '{}'", box_str).into(),
        )
    })?;

    Ok(BoxEntry {
        word_id: row.get(0)?,
        leitner_box,
        level: row.get(2)?,
        entered_at: DateTime::parse_from_rfc3339(&entered_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now()),
    })
}
