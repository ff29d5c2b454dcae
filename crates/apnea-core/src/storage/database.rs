//! SQLite log book of finished sessions.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::plan::PlanId;
use crate::record::{RecordEntry, SessionRecord};
use crate::timer::StorePort;

/// A record as it sits in the log book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub id: i64,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub record: SessionRecord,
}

/// SQLite database for the log book.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/apnea/apnea.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("apnea.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id             INTEGER PRIMARY KEY AUTOINCREMENT,
                    plan_id        INTEGER NOT NULL,
                    plan_name      TEXT NOT NULL,
                    args           TEXT NOT NULL DEFAULT '[]',
                    details        TEXT NOT NULL DEFAULT '[]',
                    completed_reps INTEGER,
                    recorded_at    TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_sessions_recorded_at ON sessions(recorded_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Add a finished session to the log book.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn append(&self, record: &SessionRecord) -> Result<i64, DatabaseError> {
        let args = serde_json::to_string(&record.args)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        let details = serde_json::to_string(&record.details)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
        self.conn.execute(
            "INSERT INTO sessions (plan_id, plan_name, args, details, completed_reps, recorded_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                record.plan_id.0,
                record.plan_name,
                args,
                details,
                record.completed_reps,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent sessions first.
    pub fn sessions(&self, limit: usize) -> Result<Vec<StoredSession>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, plan_id, plan_name, args, details, completed_reps, recorded_at
             FROM sessions
             ORDER BY recorded_at DESC, id DESC
             LIMIT ?1",
        )?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = stmt.query_map(params![limit], |row| {
            Ok(RawRow {
                id: row.get(0)?,
                plan_id: row.get(1)?,
                plan_name: row.get(2)?,
                args: row.get(3)?,
                details: row.get(4)?,
                completed_reps: row.get(5)?,
                recorded_at: row.get(6)?,
            })
        })?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?.decode()?);
        }
        Ok(sessions)
    }

    pub fn count(&self) -> Result<u64, DatabaseError> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get::<_, u64>(0))?;
        Ok(n)
    }
}

impl StorePort for Database {
    fn append(&mut self, record: SessionRecord) {
        match Database::append(self, &record) {
            Ok(id) => info!(id, plan = %record.plan_name, "Session saved to log book"),
            Err(e) => warn!("Failed to save session for '{}': {e}", record.plan_name),
        }
    }
}

struct RawRow {
    id: i64,
    plan_id: u32,
    plan_name: String,
    args: String,
    details: String,
    completed_reps: Option<u32>,
    recorded_at: String,
}

impl RawRow {
    fn decode(self) -> Result<StoredSession, DatabaseError> {
        let id = self.id;
        let corrupt = |message: String| DatabaseError::CorruptRow { id, message };
        let args: Vec<RecordEntry> =
            serde_json::from_str(&self.args).map_err(|e| corrupt(format!("args: {e}")))?;
        let details: Vec<RecordEntry> =
            serde_json::from_str(&self.details).map_err(|e| corrupt(format!("details: {e}")))?;
        let recorded_at = DateTime::parse_from_rfc3339(&self.recorded_at)
            .map_err(|e| corrupt(format!("recorded_at: {e}")))?
            .with_timezone(&Utc);
        Ok(StoredSession {
            id,
            recorded_at,
            record: SessionRecord {
                plan_id: PlanId(self.plan_id),
                plan_name: self.plan_name,
                args,
                details,
                completed_reps: self.completed_reps,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::catalog;

    fn sample(completed_reps: Option<u32>) -> SessionRecord {
        let mut record = SessionRecord::new(&catalog::list()[3], &[2, 30]);
        record.details.push(RecordEntry::new("breath 1 (s)", 5));
        record.completed_reps = completed_reps;
        record
    }

    #[test]
    fn append_and_read_back() {
        let db = Database::open_memory().unwrap();
        let id = db.append(&sample(Some(1))).unwrap();
        let sessions = db.sessions(10).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, id);
        assert_eq!(sessions[0].record, sample(Some(1)));
    }

    #[test]
    fn complete_run_stores_null_reps() {
        let db = Database::open_memory().unwrap();
        db.append(&sample(None)).unwrap();
        let sessions = db.sessions(10).unwrap();
        assert!(sessions[0].record.is_complete());
    }

    #[test]
    fn newest_first_and_limited() {
        let db = Database::open_memory().unwrap();
        let first = db.append(&sample(Some(1))).unwrap();
        let second = db.append(&sample(None)).unwrap();
        let sessions = db.sessions(1).unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].id, second);
        assert_ne!(first, second);
        assert_eq!(db.count().unwrap(), 2);
    }

    #[test]
    fn store_port_appends() {
        let mut db = Database::open_memory().unwrap();
        StorePort::append(&mut db, sample(Some(1)));
        assert_eq!(db.count().unwrap(), 1);
    }

    #[test]
    fn open_at_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.db");
        {
            let db = Database::open_at(&path).unwrap();
            db.append(&sample(None)).unwrap();
        }
        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.count().unwrap(), 1);
    }
}
