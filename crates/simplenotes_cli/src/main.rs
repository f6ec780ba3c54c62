//! Terminal front end for Simple Notes.
//!
//! # Responsibility
//! - Resolve the data directory and open the snapshot database.
//! - Run the render/read/dispatch event loop over the note store.
//!
//! # Invariants
//! - The view holds no note data; every frame is rendered from store state.
//! - Each intent fully completes its store mutation (including the snapshot
//!   write) before the next line is read.

mod intent;
mod view;

use intent::{parse_intent, Intent};
use log::warn;
use rusqlite::Connection;
use simplenotes_core::db::{open_db, open_db_in_memory};
use simplenotes_core::{
    default_log_level, init_logging, NoteId, NotePatch, NoteStore, SqliteSnapshotRepository,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const DATA_DIR_NAME: &str = "simplenotes";
const DB_FILE_NAME: &str = "simplenotes.sqlite3";
const SELECT_PROMPT: &str = "Select or create a note first.";

fn main() {
    let data_dir = resolve_data_dir();
    setup_logging(&data_dir);

    let conn = open_snapshot_db(&data_dir);
    let repo = SqliteSnapshotRepository::new(&conn);
    let mut store = NoteStore::load_or_seed(repo);

    print!("{}", view::render_screen(store.notes(), store.selected_note()));
    let mut input = io::stdin().lock();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match input.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_intent(trimmed) {
            Err(err) => {
                println!("{err}");
                continue;
            }
            Ok(Intent::Quit) => break,
            Ok(Intent::Help) => {
                print!("{}", view::render_help());
                continue;
            }
            Ok(intent) => dispatch(&mut store, intent),
        }

        print!("{}", view::render_screen(store.notes(), store.selected_note()));
    }
}

/// Applies one parsed intent to the store.
///
/// List positions are resolved against current store state here, so a
/// `delete N` never changes the selection of the targeted entry first.
fn dispatch(store: &mut NoteStore<SqliteSnapshotRepository<'_>>, intent: Intent) {
    match intent {
        Intent::Create => {
            store.create();
        }
        Intent::Select(position) => match note_id_at(store, position) {
            Some(id) => store.select(id),
            None => println!("no note at position {position}"),
        },
        Intent::SetTitle(title) => match store.selection() {
            Some(id) => store.update(id, NotePatch::title(title)),
            None => println!("{SELECT_PROMPT}"),
        },
        Intent::SetContent(content) => match store.selection() {
            Some(id) => store.update(id, NotePatch::content(content)),
            None => println!("{SELECT_PROMPT}"),
        },
        Intent::Append(line) => match store.selected_note() {
            Some(note) => {
                let id = note.id;
                let mut content = note.content.clone();
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(&line);
                store.update(id, NotePatch::content(content));
            }
            None => println!("{SELECT_PROMPT}"),
        },
        Intent::Delete(position) => {
            let target = match position {
                Some(position) => note_id_at(store, position),
                None => store.selection(),
            };
            match target {
                Some(id) => store.delete(id),
                None => match position {
                    Some(position) => println!("no note at position {position}"),
                    None => println!("{SELECT_PROMPT}"),
                },
            }
        }
        // Handled by the event loop before dispatch.
        Intent::Help | Intent::Quit => {}
    }
}

fn note_id_at(store: &NoteStore<SqliteSnapshotRepository<'_>>, position: usize) -> Option<NoteId> {
    store.notes().get(position - 1).map(|note| note.id)
}

fn resolve_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(DATA_DIR_NAME)
}

/// Best-effort logging bootstrap; the app runs without logs when it fails.
fn setup_logging(data_dir: &Path) {
    let log_dir = data_dir.join("logs");
    let Some(log_dir) = log_dir.to_str() else {
        eprintln!("log directory is not valid UTF-8; logging disabled");
        return;
    };
    if let Err(err) = init_logging(default_log_level(), log_dir) {
        eprintln!("logging disabled: {err}");
    }
}

/// Opens the snapshot database, falling back to an in-memory database when
/// the file cannot be opened. With the fallback, notes only live for this
/// session.
fn open_snapshot_db(data_dir: &Path) -> Connection {
    if let Err(err) = std::fs::create_dir_all(data_dir) {
        warn!("event=data_dir_create module=cli status=error error={err}");
    }

    match open_db(data_dir.join(DB_FILE_NAME)) {
        Ok(conn) => conn,
        Err(err) => {
            warn!("event=db_fallback module=cli status=error error={err}");
            eprintln!("note storage unavailable ({err}); changes will not survive this session");
            match open_db_in_memory() {
                Ok(conn) => conn,
                Err(err) => {
                    eprintln!("failed to open in-memory storage: {err}");
                    std::process::exit(1);
                }
            }
        }
    }
}
