//! Sample library for Point Recorder
//! Finished recordings are kept in SQLite so they can be browsed and trained on

use crate::trajectory::Sample;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Library entry without its points
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSummary {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub point_count: usize,
}

pub struct SampleStore {
    conn: Connection,
}

impl SampleStore {
    /// Open or create the library at the given path
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        debug!(path = %path.display(), "Sample store opened");
        Ok(store)
    }

    /// Throwaway library, used when the file cannot be opened
    pub fn open_in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS samples (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                created_at TEXT NOT NULL,
                duration_ms INTEGER NOT NULL,
                point_count INTEGER NOT NULL,
                points TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_samples_created ON samples(created_at);",
        )?;
        Ok(())
    }

    /// Store a finished recording, returns its id
    pub fn insert(&self, points: &[Sample]) -> Result<i64> {
        let json = serde_json::to_string(points)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let duration = points.last().map(|s| s.t).unwrap_or(0);

        self.conn.execute(
            "INSERT INTO samples (created_at, duration_ms, point_count, points)
             VALUES (?1, ?2, ?3, ?4)",
            params![Utc::now(), duration as i64, points.len() as i64, json],
        )?;
        let id = self.conn.last_insert_rowid();
        debug!(id, points = points.len(), "Sample stored");
        Ok(id)
    }

    /// All entries, newest first
    pub fn list(&self) -> Result<Vec<SampleSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, duration_ms, point_count FROM samples ORDER BY id DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(SampleSummary {
                    id: row.get(0)?,
                    created_at: row.get(1)?,
                    duration_ms: row.get::<_, i64>(2)? as u64,
                    point_count: row.get::<_, i64>(3)? as usize,
                })
            })?
            .collect::<Result<Vec<_>>>()?;

        Ok(rows)
    }

    pub fn load_points(&self, id: i64) -> Result<Option<Vec<Sample>>> {
        let json: Option<String> = self
            .conn
            .query_row("SELECT points FROM samples WHERE id = ?1", params![id], |r| {
                r.get(0)
            })
            .optional()?;
        json.map(|j| decode_points(&j)).transpose()
    }

    /// Points of every stored recording, oldest first. Rows that fail to
    /// decode are skipped.
    pub fn load_all_points(&self) -> Result<Vec<Vec<Sample>>> {
        let mut stmt = self.conn.prepare("SELECT id, points FROM samples ORDER BY id")?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>>>()?;

        Ok(rows
            .into_iter()
            .filter_map(|(id, json)| match decode_points(&json) {
                Ok(points) => Some(points),
                Err(e) => {
                    warn!(id, error = %e, "Skipping unreadable sample");
                    None
                }
            })
            .collect())
    }

    /// Delete one entry. Returns false when the id was not stored.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let removed = self.conn.execute("DELETE FROM samples WHERE id = ?1", params![id])?;
        if removed > 0 {
            debug!(id, "Sample deleted");
        }
        Ok(removed > 0)
    }

    /// Remove every entry, returns how many were deleted
    pub fn clear(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM samples", [])?;
        debug!(removed, "Sample store cleared");
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM samples", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

fn decode_points(json: &str) -> Result<Vec<Sample>> {
    serde_json::from_str(json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: u64) -> Vec<Sample> {
        (0..n).map(|i| Sample::new(i as f32, 2.0 * i as f32, i * 10)).collect()
    }

    #[test]
    fn insert_and_list_newest_first() {
        let store = SampleStore::open_in_memory().unwrap();
        let first = store.insert(&points(3)).unwrap();
        let second = store.insert(&points(5)).unwrap();

        let list = store.list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second);
        assert_eq!(list[0].point_count, 5);
        assert_eq!(list[0].duration_ms, 40);
        assert_eq!(list[1].id, first);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn points_come_back_intact() {
        let store = SampleStore::open_in_memory().unwrap();
        let id = store.insert(&points(4)).unwrap();
        assert_eq!(store.load_points(id).unwrap(), Some(points(4)));
        assert_eq!(store.load_points(id + 100).unwrap(), None);
        assert_eq!(store.load_all_points().unwrap(), vec![points(4)]);
    }

    #[test]
    fn delete_targets_a_single_entry() {
        let store = SampleStore::open_in_memory().unwrap();
        let first = store.insert(&points(2)).unwrap();
        let second = store.insert(&points(2)).unwrap();

        assert!(store.delete(first).unwrap());
        assert!(!store.delete(first).unwrap());
        let list = store.list().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, second);
    }

    #[test]
    fn clear_empties_the_library() {
        let store = SampleStore::open_in_memory().unwrap();
        store.insert(&points(2)).unwrap();
        store.insert(&points(1)).unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.load_all_points().unwrap().is_empty());
    }

    #[test]
    fn corrupt_rows_are_skipped_when_training() {
        let store = SampleStore::open_in_memory().unwrap();
        store.insert(&points(3)).unwrap();
        store
            .conn
            .execute(
                "INSERT INTO samples (created_at, duration_ms, point_count, points)
                 VALUES (?1, 0, 0, 'not json')",
                params![Utc::now()],
            )
            .unwrap();
        assert_eq!(store.load_all_points().unwrap().len(), 1);
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("samples.db");
        {
            let store = SampleStore::open(&path).unwrap();
            store.insert(&points(2)).unwrap();
        }
        let store = SampleStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
