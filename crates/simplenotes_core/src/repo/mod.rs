//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the snapshot data-access contract used by the store.
//! - Isolate SQLite and serialization details from store orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Write paths replace the snapshot wholesale; there is no partial update.

pub mod snapshot_repo;
