//! Note store state machine.
//!
//! # Responsibility
//! - Provide the create/select/update/delete operations over the collection.
//! - Seed the collection when no usable snapshot exists.
//! - Write the snapshot after every state change, best-effort.
//!
//! # Invariants
//! - Note ids remain unique for the collection lifetime.
//! - The collection is sorted by `updated_at` descending after any mutation
//!   and after load; equal timestamps keep their prior relative order.
//! - Selection is either an id present in the collection or none.
//! - Operations never surface persistence errors to callers.

use crate::clock::{Clock, SystemClock};
use crate::model::note::{Note, NoteId, NotePatch};
use crate::repo::snapshot_repo::SnapshotRepository;
use log::{info, warn};

/// Owns the ordered note collection and the current selection.
///
/// Generic over the snapshot repository and the clock so that persistence
/// failures and timestamp ordering can be exercised deterministically.
pub struct NoteStore<R: SnapshotRepository, C: Clock = SystemClock> {
    notes: Vec<Note>,
    selected: Option<NoteId>,
    repo: R,
    clock: C,
}

impl<R: SnapshotRepository> NoteStore<R, SystemClock> {
    /// Builds a store from the persisted snapshot, falling back to seed
    /// notes when the snapshot is absent or unreadable.
    pub fn load_or_seed(repo: R) -> Self {
        Self::load_or_seed_with_clock(repo, SystemClock)
    }
}

impl<R: SnapshotRepository, C: Clock> NoteStore<R, C> {
    /// Same as [`NoteStore::load_or_seed`] with an explicit clock.
    pub fn load_or_seed_with_clock(repo: R, clock: C) -> Self {
        let mut notes = match repo.load_snapshot() {
            Ok(Some(notes)) => {
                info!(
                    "event=store_load module=store status=ok source=snapshot count={}",
                    notes.len()
                );
                notes
            }
            Ok(None) => {
                info!("event=store_load module=store status=ok source=seed reason=no_snapshot");
                seed_notes(clock.now_ms())
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error source=seed error={err}"
                );
                seed_notes(clock.now_ms())
            }
        };
        sort_by_recency(&mut notes);
        let selected = notes.first().map(|note| note.id);

        Self {
            notes,
            selected,
            repo,
            clock,
        }
    }

    /// Creates a new untitled note at the front of the collection and
    /// selects it. Returns the new note's id.
    pub fn create(&mut self) -> NoteId {
        let note = Note::untitled(self.clock.now_ms());
        let id = note.id;
        self.notes.insert(0, note);
        self.selected = Some(id);
        self.persist();
        id
    }

    /// Sets the selection to `id` when present, otherwise to none.
    pub fn select(&mut self, id: NoteId) {
        self.selected = self.contains(id).then_some(id);
        self.persist();
    }

    /// Merges `patch` into the identified note, refreshes its timestamp and
    /// re-sorts the collection. Unknown ids are a no-op.
    pub fn update(&mut self, id: NoteId, patch: NotePatch) {
        let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
            return;
        };
        note.apply(patch, self.clock.now_ms());
        sort_by_recency(&mut self.notes);
        self.persist();
    }

    /// Removes the identified note. When it was selected, selection moves to
    /// the first remaining note, or none. Unknown ids are a no-op.
    pub fn delete(&mut self, id: NoteId) {
        if !self.contains(id) {
            return;
        }
        self.notes.retain(|note| note.id != id);
        if self.selected == Some(id) {
            self.selected = self.notes.first().map(|note| note.id);
        }
        self.persist();
    }

    /// The collection, sorted by `updated_at` descending.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Current selection id, if any.
    pub fn selection(&self) -> Option<NoteId> {
        self.selected
    }

    /// The selected note. A stale or empty selection reads as `None`.
    pub fn selected_note(&self) -> Option<&Note> {
        let selected = self.selected?;
        self.notes.iter().find(|note| note.id == selected)
    }

    fn contains(&self, id: NoteId) -> bool {
        self.notes.iter().any(|note| note.id == id)
    }

    /// Best-effort snapshot write. Failures are logged and swallowed; the
    /// in-memory state change has already taken effect.
    fn persist(&self) {
        if let Err(err) = self.repo.save_snapshot(&self.notes) {
            warn!(
                "event=snapshot_write module=store status=error count={} error={err}",
                self.notes.len()
            );
        }
    }
}

fn sort_by_recency(notes: &mut [Note]) {
    notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

/// Initial collection used when no snapshot is available.
fn seed_notes(now_ms: i64) -> Vec<Note> {
    vec![
        Note::new(
            "Welcome to Simple Notes",
            "This is a lightweight notes app.\n\n\
             - Select a note from the sidebar\n\
             - Create a new note using the + button\n\
             - Edit the title and content\n\
             - Delete a note with the trash icon\n\n\
             Your notes are stored locally on this machine.",
            now_ms,
        ),
        Note::new(
            "Minimalistic, light theme",
            "The app uses a minimal UI with your color scheme:\n\
             - Primary: #1976d2\n\
             - Secondary: #424242\n\
             - Accent: #ffd600",
            now_ms,
        ),
    ]
}
