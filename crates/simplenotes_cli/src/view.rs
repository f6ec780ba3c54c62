//! Terminal rendering for the note store.
//!
//! # Responsibility
//! - Render header, list panel and editor panel from store state.
//!
//! # Invariants
//! - Rendering is a pure function of the passed-in state; no store access,
//!   no mutation, no I/O.

use simplenotes_core::Note;
use time::macros::format_description;
use time::OffsetDateTime;

/// Display label for notes whose title is empty.
const UNTITLED_LABEL: &str = "Untitled";

/// Renders the full screen: header, list panel, editor panel.
pub fn render_screen(notes: &[Note], selected: Option<&Note>) -> String {
    let mut screen = String::new();
    screen.push_str(&render_header());
    screen.push('\n');
    screen.push_str(&render_list(notes, selected.map(|note| note.id)));
    screen.push('\n');
    screen.push_str(&render_editor(selected));
    screen
}

/// Brand line plus the create affordance.
pub fn render_header() -> String {
    format!(
        "Simple Notes v{} — `new` creates a note, `help` lists commands\n",
        simplenotes_core::core_version()
    )
}

/// The ordered note list, one line per note, or the empty-state message.
///
/// The selected entry is marked with `*`; positions are 1-based and are the
/// handles used by `open`/`delete`.
pub fn render_list(notes: &[Note], selected: Option<simplenotes_core::NoteId>) -> String {
    let mut panel = String::from("Notes\n");
    if notes.is_empty() {
        panel.push_str("  No notes yet. Create one!\n");
        return panel;
    }

    for (index, note) in notes.iter().enumerate() {
        let marker = if selected == Some(note.id) { '*' } else { ' ' };
        panel.push_str(&format!(
            "  {:>2}. {marker} {:<40} {}\n",
            index + 1,
            display_title(note),
            format_updated_at(note.updated_at)
        ));
    }
    panel
}

/// The editor panel for the selected note, or the selection prompt.
pub fn render_editor(selected: Option<&Note>) -> String {
    let Some(note) = selected else {
        return String::from("Select or create a note to begin.\n");
    };

    let mut panel = format!(
        "-- {} (edited {}) --\n",
        display_title(note),
        format_updated_at(note.updated_at)
    );
    if note.content.is_empty() {
        panel.push_str("(empty note)\n");
    } else {
        panel.push_str(&note.content);
        if !note.content.ends_with('\n') {
            panel.push('\n');
        }
    }
    panel
}

/// Command list shown by `help`.
pub fn render_help() -> String {
    String::from(
        "Commands:\n\
         \x20 new              create a note and open it\n\
         \x20 open N           open the note at list position N\n\
         \x20 title TEXT       replace the open note's title\n\
         \x20 body TEXT        replace the open note's content\n\
         \x20 append TEXT      add a line to the open note's content\n\
         \x20 delete [N]       delete note N, or the open note\n\
         \x20 quit             leave\n",
    )
}

fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        UNTITLED_LABEL
    } else {
        &note.title
    }
}

/// Human-readable rendering of an epoch-millisecond timestamp (UTC).
///
/// Falls back to the raw number when the value is out of range.
fn format_updated_at(epoch_ms: i64) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(epoch_ms) * 1_000_000)
        .ok()
        .and_then(|stamp| stamp.format(&format).ok())
        .unwrap_or_else(|| epoch_ms.to_string())
}
