use simplenotes_core::db::{open_db, open_db_in_memory};
use simplenotes_core::{
    Note, NoteStore, RepoError, SnapshotRepository, SqliteSnapshotRepository, SNAPSHOT_SLOT,
};
use rusqlite::params;

#[test]
fn missing_snapshot_loads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);

    assert_eq!(repo.load_snapshot().unwrap(), None);
}

#[test]
fn save_then_load_round_trips_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);

    let notes = vec![
        Note::new("first", "alpha body", 2_000),
        Note::new("", "untitled body", 1_000),
    ];
    repo.save_snapshot(&notes).unwrap();

    let loaded = repo.load_snapshot().unwrap().unwrap();
    assert_eq!(loaded, notes);
}

#[test]
fn save_overwrites_the_previous_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);

    repo.save_snapshot(&[Note::new("old", "old body", 1)])
        .unwrap();
    let replacement = vec![Note::new("new", "new body", 2)];
    repo.save_snapshot(&replacement).unwrap();

    let loaded = repo.load_snapshot().unwrap().unwrap();
    assert_eq!(loaded, replacement);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM snapshots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn snapshot_payload_uses_the_documented_field_names() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);

    repo.save_snapshot(&[Note::new("t", "c", 7)]).unwrap();

    let value: String = conn
        .query_row(
            "SELECT value FROM snapshots WHERE slot = ?1;",
            [SNAPSHOT_SLOT],
            |row| row.get(0),
        )
        .unwrap();
    assert!(value.contains("\"updatedAt\":7"));
    assert!(value.contains("\"id\""));
    assert!(value.contains("\"title\""));
    assert!(value.contains("\"content\""));
}

#[test]
fn malformed_snapshot_is_rejected_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO snapshots (slot, value, written_at) VALUES (?1, ?2, 0);",
        params![SNAPSHOT_SLOT, "not json at all"],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::new(&conn);
    let err = repo.load_snapshot().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn duplicate_note_ids_are_rejected_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    let note = Note::new("twin", "body", 1);
    let payload = serde_json::to_string(&[note.clone(), note]).unwrap();
    conn.execute(
        "INSERT INTO snapshots (slot, value, written_at) VALUES (?1, ?2, 0);",
        params![SNAPSHOT_SLOT, payload],
    )
    .unwrap();

    let repo = SqliteSnapshotRepository::new(&conn);
    let err = repo.load_snapshot().unwrap_err();
    match err {
        RepoError::InvalidData(message) => assert!(message.contains("duplicate")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn store_falls_back_to_seeds_when_the_snapshot_is_unreadable() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO snapshots (slot, value, written_at) VALUES (?1, ?2, 0);",
        params![SNAPSHOT_SLOT, "{\"definitely\": \"not an array\"}"],
    )
    .unwrap();

    let store = NoteStore::load_or_seed(SqliteSnapshotRepository::new(&conn));

    assert_eq!(store.notes().len(), 2);
    assert_eq!(store.notes()[0].title, "Welcome to Simple Notes");
}

#[test]
fn snapshot_survives_closing_and_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("simplenotes.sqlite3");

    let notes = vec![Note::new("kept", "across sessions", 42)];
    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSnapshotRepository::new(&conn);
        repo.save_snapshot(&notes).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteSnapshotRepository::new(&conn);
    assert_eq!(repo.load_snapshot().unwrap().unwrap(), notes);
}
