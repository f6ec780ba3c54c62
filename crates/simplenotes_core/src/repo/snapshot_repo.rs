//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist the full note collection as one serialized snapshot.
//! - Load and validate a previously persisted snapshot.
//!
//! # Invariants
//! - The snapshot lives in a single named slot; writes overwrite it.
//! - Loaded snapshots with malformed JSON or duplicate note ids are
//!   rejected as `InvalidData`, never partially adopted.

use crate::db::DbError;
use crate::model::note::Note;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the key-value slot holding the note collection.
pub const SNAPSHOT_SLOT: &str = "notes";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for snapshot persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted snapshot: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for snapshot load/save.
pub trait SnapshotRepository {
    /// Loads the persisted note collection.
    ///
    /// Returns `Ok(None)` when no snapshot has been written yet.
    fn load_snapshot(&self) -> RepoResult<Option<Vec<Note>>>;

    /// Replaces the persisted snapshot with the given collection.
    fn save_snapshot(&self, notes: &[Note]) -> RepoResult<()>;
}

/// SQLite-backed snapshot repository.
///
/// Stores the collection as a JSON array in the `snapshots` table under
/// [`SNAPSHOT_SLOT`].
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn load_snapshot(&self) -> RepoResult<Option<Vec<Note>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM snapshots WHERE slot = ?1;",
                [SNAPSHOT_SLOT],
                |row| row.get(0),
            )
            .optional()?;

        let Some(value) = value else {
            return Ok(None);
        };

        let notes: Vec<Note> = serde_json::from_str(&value)
            .map_err(|err| RepoError::InvalidData(format!("malformed note array: {err}")))?;
        ensure_unique_ids(&notes)?;

        Ok(Some(notes))
    }

    fn save_snapshot(&self, notes: &[Note]) -> RepoResult<()> {
        let value = serde_json::to_string(notes)
            .map_err(|err| RepoError::InvalidData(format!("unserializable note array: {err}")))?;

        self.conn.execute(
            "INSERT INTO snapshots (slot, value, written_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(slot) DO UPDATE SET
                value = excluded.value,
                written_at = excluded.written_at;",
            params![SNAPSHOT_SLOT, value],
        )?;

        Ok(())
    }
}

fn ensure_unique_ids(notes: &[Note]) -> RepoResult<()> {
    let mut seen = HashSet::with_capacity(notes.len());
    for note in notes {
        if !seen.insert(note.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate note id `{}`",
                note.id
            )));
        }
    }
    Ok(())
}
