//! Append-only record storage, keyed by user.
//!
//! The engine modules are pure functions over already-materialized record
//! sets; this trait is the seam that keeps them that way. Handlers depend on
//! `dyn MoodStore`, so the in-memory implementation can be swapped for a real
//! database without touching the engine.

mod memory;

pub use memory::MemoryStore;

use crate::models::{ChatSession, JournalEntry, MoodRecord};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Append/read access to the three per-user collections. Records are never
/// updated or deleted; appends must not corrupt concurrent reads.
pub trait MoodStore: Send + Sync {
    fn append_mood(&self, record: MoodRecord) -> Result<(), StoreError>;

    /// All mood records for a user, in insertion (timestamp) order.
    fn moods_for_user(&self, user_id: &str) -> Result<Vec<MoodRecord>, StoreError>;

    fn append_journal(&self, entry: JournalEntry) -> Result<(), StoreError>;

    fn journal_for_user(&self, user_id: &str) -> Result<Vec<JournalEntry>, StoreError>;

    fn append_session(&self, session: ChatSession) -> Result<(), StoreError>;

    fn sessions_for_user(&self, user_id: &str) -> Result<Vec<ChatSession>, StoreError>;
}
