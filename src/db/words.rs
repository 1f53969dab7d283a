//! Word catalog queries and per-word statistics

use rusqlite::{params, params_from_iter, Connection, Result};

use crate::domain::{NewWord, WordItem};
#[cfg(feature = "profiling")]
use crate::profiling::EventType;

const WORD_COLUMNS: &str = "id, prompt, answer, level, correct_count, appear_count, hit_rate";

/// Ranking direction for hit-rate reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Lowest hit rate first
    Hardest,
    /// Highest hit rate first
    Easiest,
}

pub fn insert_word(conn: &Connection, word: &NewWord) -> Result<i64> {
    match word.id {
        Some(id) => {
            conn.execute(
                "INSERT INTO words (id, prompt, answer, level) VALUES (?1, ?2, ?3, ?4)",
                params![id, word.prompt, word.answer, word.level],
            )?;
            Ok(id)
        }
        None => {
            conn.execute(
                "INSERT INTO words (prompt, answer, level) VALUES (?1, ?2, ?3)",
                params![word.prompt, word.answer, word.level],
            )?;
            Ok(conn.last_insert_rowid())
        }
    }
}

pub fn count_words(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM words", [], |row| row.get(0))
}

pub fn get_word_by_id(conn: &Connection, id: i64) -> Result<Option<WordItem>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM words WHERE id = ?1", WORD_COLUMNS))?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_word(row)?))
    } else {
        Ok(None)
    }
}

pub fn get_words_up_to_level(conn: &Connection, level: i64) -> Result<Vec<WordItem>> {
    #[cfg(feature = "profiling")]
    crate::profile_log!(EventType::DbQuery {
        operation: "select_level".into(),
        table: "words".into(),
    });

    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM words WHERE level <= ?1 ORDER BY id",
        WORD_COLUMNS
    ))?;

    let words = stmt
        .query_map(params![level], row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

pub fn get_words_by_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<WordItem>> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let query = format!(
        "SELECT {} FROM words WHERE id IN ({}) ORDER BY id",
        WORD_COLUMNS,
        placeholders(ids.len())
    );
    let mut stmt = conn.prepare(&query)?;

    let words = stmt
        .query_map(params_from_iter(ids.iter()), row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// Every catalog word whose id is not in `ids`
pub fn get_words_excluding_ids(conn: &Connection, ids: &[i64]) -> Result<Vec<WordItem>> {
    #[cfg(feature = "profiling")]
    crate::profile_log!(EventType::DbQuery {
        operation: "select_excluding".into(),
        table: "words".into(),
    });

    let query = if ids.is_empty() {
        format!("SELECT {} FROM words ORDER BY id", WORD_COLUMNS)
    } else {
        format!(
            "SELECT {} FROM words WHERE id NOT IN ({}) ORDER BY id",
            WORD_COLUMNS,
            placeholders(ids.len())
        )
    };
    let mut stmt = conn.prepare(&query)?;

    let words = stmt
        .query_map(params_from_iter(ids.iter()), row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

/// Count one answer against the word and return the updated row.
///
/// Counts and hit rate change in one statement; SET expressions read the
/// pre-update row. Returns None for an unknown id.
pub fn record_word_answer(conn: &Connection, id: i64, correct: bool) -> Result<Option<WordItem>> {
    let updated = conn.execute(
        r#"
    UPDATE words
    SET appear_count = appear_count + 1,
        correct_count = correct_count + ?1,
        hit_rate = CAST(correct_count + ?1 AS REAL) / (appear_count + 1)
    WHERE id = ?2
    "#,
        params![if correct { 1 } else { 0 }, id],
    )?;
    if updated == 0 {
        return Ok(None);
    }
    get_word_by_id(conn, id)
}

/// Words with a defined hit rate, ranked, optionally limited to one level
pub fn get_ranked_words(
    conn: &Connection,
    order: RankOrder,
    limit: usize,
    level: Option<i64>,
) -> Result<Vec<WordItem>> {
    let direction = match order {
        RankOrder::Hardest => "ASC",
        RankOrder::Easiest => "DESC",
    };
    let query = format!(
        r#"
    SELECT {}
    FROM words
    WHERE hit_rate >= 0 AND (?1 IS NULL OR level = ?1)
    ORDER BY hit_rate {}, appear_count DESC, id ASC
    LIMIT ?2
    "#,
        WORD_COLUMNS, direction
    );
    let mut stmt = conn.prepare(&query)?;

    let words = stmt
        .query_map(params![level, limit as i64], row_to_word)?
        .collect::<Result<Vec<_>>>()?;
    Ok(words)
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

fn row_to_word(row: &rusqlite::Row) -> Result<WordItem> {
    let hit_rate: f64 = row.get(6)?;

    Ok(WordItem {
        id: row.get(0)?,
        prompt: row.get(1)?,
        answer: row.get(2)?,
        level: row.get(3)?,
        correct_count: row.get(4)?,
        appear_count: row.get(5)?,
        hit_rate: if hit_rate < 0.0 { None } else { Some(hit_rate) },
    })
}
