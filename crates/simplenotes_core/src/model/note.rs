//! Note domain model.
//!
//! # Responsibility
//! - Define the note record and its partial-edit carrier.
//! - Provide merge semantics for title/content patches.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - Applying a patch always refreshes `updated_at`, even for an empty patch.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Placeholder title assigned to freshly created notes.
pub const UNTITLED_NOTE_TITLE: &str = "Untitled note";

/// A single user-authored text record.
///
/// Snapshot field names are part of the persisted layout; `updated_at` is
/// serialized as `updatedAt` (epoch milliseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable global ID used for selection and snapshot identity.
    pub id: NoteId,
    /// Free text. May be empty; the view supplies a display fallback.
    pub title: String,
    /// Free text body. May be empty.
    pub content: String,
    /// Epoch milliseconds of the last mutation.
    #[serde(rename = "updatedAt")]
    pub updated_at: i64,
}

/// Partial edit applied to one note.
///
/// `None` fields are left untouched; `Some("")` is a valid assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Patch that replaces only the title.
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            title: Some(value.into()),
            content: None,
        }
    }

    /// Patch that replaces only the content.
    pub fn content(value: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(value.into()),
        }
    }
}

impl Note {
    /// Creates a note with a generated stable ID.
    pub fn new(title: impl Into<String>, content: impl Into<String>, updated_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, updated_at)
    }

    /// Creates a note with a caller-provided stable ID.
    ///
    /// Used by snapshot load paths where identity already exists.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        updated_at: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            updated_at,
        }
    }

    /// Creates the note shape produced by the store's `create` operation:
    /// placeholder title, empty content.
    pub fn untitled(updated_at: i64) -> Self {
        Self::new(UNTITLED_NOTE_TITLE, "", updated_at)
    }

    /// Merges a patch into this note and stamps the mutation time.
    pub fn apply(&mut self, patch: NotePatch, now_ms: i64) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now_ms;
    }
}
