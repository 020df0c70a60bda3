//! SQLite-backed tag ledger.
//!
//! One row per canonical (lowercase) tag holding its cumulative count of
//! completed work segments. The schema is fixed at two columns; rowid order
//! doubles as insertion order for ranked-summary tie breaking.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

use super::data_dir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRecord {
    pub tag: String,
    pub count: u64,
}

/// Persisted mapping of tag -> completion count with an in-memory mirror.
///
/// The mirror updates only after a statement succeeds, so it never runs
/// ahead of the database.
#[derive(Debug)]
pub struct TagLedger {
    conn: Connection,
    records: Vec<TagRecord>,
}

impl TagLedger {
    /// Open the ledger at `~/.config/tomata/tomata.db`, creating file and
    /// schema as needed.
    pub fn open() -> Result<Self, LedgerError> {
        let path = data_dir()?.join("tomata.db");
        Self::open_at(&path)
    }

    /// Open the ledger at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, LedgerError> {
        let conn = Connection::open(path).map_err(|source| LedgerError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::with_conn(conn)
    }

    /// In-memory ledger, used by tests and dry runs.
    pub fn open_memory() -> Result<Self, LedgerError> {
        let conn = Connection::open_in_memory().map_err(|source| LedgerError::OpenFailed {
            path: ":memory:".into(),
            source,
        })?;
        Self::with_conn(conn)
    }

    fn with_conn(conn: Connection) -> Result<Self, LedgerError> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tags (
                tag   TEXT PRIMARY KEY,
                count INTEGER NOT NULL
            );",
        )?;
        let mut records = Vec::new();
        {
            let mut stmt = conn.prepare("SELECT tag, count FROM tags ORDER BY rowid")?;
            let rows = stmt.query_map([], |row| {
                Ok(TagRecord {
                    tag: row.get(0)?,
                    count: row.get(1)?,
                })
            })?;
            for row in rows {
                records.push(row?);
            }
        }
        Ok(Self { conn, records })
    }

    pub fn records(&self) -> &[TagRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Current count for a tag (0 when absent). Case-insensitive.
    pub fn count(&self, tag: &str) -> u64 {
        let canonical = canonicalize(tag);
        self.records
            .iter()
            .find(|r| r.tag == canonical)
            .map_or(0, |r| r.count)
    }

    /// Add one completion to `tag`. Empty tags are a no-op.
    ///
    /// The upsert is a single statement, so the persisted value is always
    /// the result of a fully-applied increment.
    pub fn increment(&mut self, tag: &str) -> Result<(), LedgerError> {
        let canonical = canonicalize(tag);
        if canonical.is_empty() {
            return Ok(());
        }
        self.conn.execute(
            "INSERT INTO tags (tag, count) VALUES (?1, 1)
             ON CONFLICT(tag) DO UPDATE SET count = count + 1",
            params![canonical],
        )?;
        match self.records.iter_mut().find(|r| r.tag == canonical) {
            Some(record) => record.count += 1,
            None => self.records.push(TagRecord {
                tag: canonical,
                count: 1,
            }),
        }
        Ok(())
    }

    /// All records, highest count first; ties keep insertion order.
    pub fn ranked_summary(&self) -> Vec<TagRecord> {
        let mut out = self.records.clone();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }

    /// Delete every record. The confirmation step belongs to the caller.
    pub fn reset_all(&mut self) -> Result<(), LedgerError> {
        self.conn.execute("DELETE FROM tags", [])?;
        self.records.clear();
        Ok(())
    }
}

fn canonicalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_as_empty_ledger() {
        let ledger = TagLedger::open_memory().unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.count("anything"), 0);
    }

    #[test]
    fn n_increments_count_n() {
        let mut ledger = TagLedger::open_memory().unwrap();
        for _ in 0..7 {
            ledger.increment("dev").unwrap();
        }
        assert_eq!(ledger.count("dev"), 7);
    }

    #[test]
    fn case_variants_collapse_to_one_record() {
        let mut ledger = TagLedger::open_memory().unwrap();
        ledger.increment("Dev").unwrap();
        ledger.increment("dev").unwrap();
        ledger.increment("DEV ").unwrap();
        assert_eq!(ledger.records().len(), 1);
        assert_eq!(ledger.count("dEv"), 3);
    }

    #[test]
    fn empty_tag_is_a_no_op() {
        let mut ledger = TagLedger::open_memory().unwrap();
        ledger.increment("").unwrap();
        ledger.increment("   ").unwrap();
        assert!(ledger.is_empty());
    }

    #[test]
    fn ranked_summary_sorts_desc_with_stable_ties() {
        let mut ledger = TagLedger::open_memory().unwrap();
        for _ in 0..2 {
            ledger.increment("writing").unwrap();
        }
        for _ in 0..5 {
            ledger.increment("dev").unwrap();
        }
        for _ in 0..2 {
            ledger.increment("reading").unwrap();
        }
        let ranked = ledger.ranked_summary();
        let tags: Vec<&str> = ranked.iter().map(|r| r.tag.as_str()).collect();
        // "writing" was inserted before "reading"; the tie keeps that order.
        assert_eq!(tags, vec!["dev", "writing", "reading"]);
    }

    #[test]
    fn reset_all_destroys_every_record() {
        let mut ledger = TagLedger::open_memory().unwrap();
        ledger.increment("dev").unwrap();
        ledger.increment("ops").unwrap();
        ledger.reset_all().unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.count("dev"), 0);
    }

    #[test]
    fn counts_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");
        {
            let mut ledger = TagLedger::open_at(&path).unwrap();
            ledger.increment("dev").unwrap();
            ledger.increment("dev").unwrap();
            ledger.increment("ops").unwrap();
        }
        let ledger = TagLedger::open_at(&path).unwrap();
        assert_eq!(ledger.count("dev"), 2);
        assert_eq!(ledger.count("ops"), 1);
        // rowid order survives as insertion order
        assert_eq!(ledger.records()[0].tag, "dev");
    }

    #[test]
    fn missing_file_parent_is_an_open_error() {
        let err = TagLedger::open_at(Path::new("/nonexistent-dir/x/ledger.db")).unwrap_err();
        assert!(matches!(err, LedgerError::OpenFailed { .. }));
    }
}
