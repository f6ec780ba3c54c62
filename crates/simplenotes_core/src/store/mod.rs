//! Note store orchestration.
//!
//! # Responsibility
//! - Own the in-memory note collection and selection state.
//! - Keep the persisted snapshot in step with every state change.
//!
//! # Invariants
//! - In-memory state is the source of truth; the snapshot is a disposable
//!   cache that is rebuilt from seeds when unreadable.

pub mod note_store;
