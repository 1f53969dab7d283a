use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS words (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      prompt TEXT NOT NULL,
      answer TEXT NOT NULL,
      level INTEGER NOT NULL,
      correct_count INTEGER NOT NULL DEFAULT 0,
      appear_count INTEGER NOT NULL DEFAULT 0,
      -- -1 until the word has been answered
      hit_rate REAL NOT NULL DEFAULT -1
    );

    CREATE TABLE IF NOT EXISTS learners (
      name TEXT PRIMARY KEY,
      times_appeared INTEGER NOT NULL DEFAULT 0,
      correct_answered INTEGER NOT NULL DEFAULT 0,
      hit_rate REAL NOT NULL DEFAULT -1
    );

    -- One row per filed word: the primary key keeps a word in a single box
    CREATE TABLE IF NOT EXISTS box_entries (
      learner TEXT NOT NULL,
      word_id INTEGER NOT NULL,
      box TEXT NOT NULL CHECK (box IN ('A', 'B', 'C', 'D')),
      level INTEGER NOT NULL,
      entered_at TEXT NOT NULL,
      PRIMARY KEY (learner, word_id),
      FOREIGN KEY (learner) REFERENCES learners(name)
    );

    CREATE TABLE IF NOT EXISTS seen_words (
      learner TEXT NOT NULL,
      word_id INTEGER NOT NULL,
      PRIMARY KEY (learner, word_id),
      FOREIGN KEY (learner) REFERENCES learners(name)
    );

    CREATE INDEX IF NOT EXISTS idx_words_level ON words(level);
    CREATE INDEX IF NOT EXISTS idx_words_hit_rate ON words(hit_rate);
    CREATE INDEX IF NOT EXISTS idx_box_entries_box ON box_entries(learner, box);
    "#,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('words', 'learners', 'box_entries', 'seen_words')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 4);
    }

    #[test]
    fn test_box_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn.execute("INSERT INTO learners (name) VALUES ('Test1')", []).unwrap();

        let bad = conn.execute(
            "INSERT INTO box_entries (learner, word_id, box, level, entered_at)
             VALUES ('Test1', 1, 'E', 1, '2024-01-01T00:00:00+00:00')",
            [],
        );
        assert!(bad.is_err());
    }
}
