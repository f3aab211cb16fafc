use std::collections::HashMap;
use std::sync::RwLock;

use super::{MoodStore, StoreError};
use crate::models::{ChatSession, JournalEntry, MoodRecord};

/// Volatile in-memory store. Data is lost on restart — the reference
/// system's storage model, kept behind the `MoodStore` seam.
///
/// One writer lock per collection; reads clone the user's slice out so no
/// lock is held while the caller computes over it.
#[derive(Default)]
pub struct MemoryStore {
    moods: RwLock<HashMap<String, Vec<MoodRecord>>>,
    journal: RwLock<HashMap<String, Vec<JournalEntry>>>,
    sessions: RwLock<HashMap<String, Vec<ChatSession>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoodStore for MemoryStore {
    fn append_mood(&self, record: MoodRecord) -> Result<(), StoreError> {
        let mut moods = self.moods.write().map_err(|_| StoreError::Poisoned)?;
        moods.entry(record.user_id.clone()).or_default().push(record);
        Ok(())
    }

    fn moods_for_user(&self, user_id: &str) -> Result<Vec<MoodRecord>, StoreError> {
        let moods = self.moods.read().map_err(|_| StoreError::Poisoned)?;
        Ok(moods.get(user_id).cloned().unwrap_or_default())
    }

    fn append_journal(&self, entry: JournalEntry) -> Result<(), StoreError> {
        let mut journal = self.journal.write().map_err(|_| StoreError::Poisoned)?;
        journal.entry(entry.user_id.clone()).or_default().push(entry);
        Ok(())
    }

    fn journal_for_user(&self, user_id: &str) -> Result<Vec<JournalEntry>, StoreError> {
        let journal = self.journal.read().map_err(|_| StoreError::Poisoned)?;
        Ok(journal.get(user_id).cloned().unwrap_or_default())
    }

    fn append_session(&self, session: ChatSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().map_err(|_| StoreError::Poisoned)?;
        sessions
            .entry(session.user_id.clone())
            .or_default()
            .push(session);
        Ok(())
    }

    fn sessions_for_user(&self, user_id: &str) -> Result<Vec<ChatSession>, StoreError> {
        let sessions = self.sessions.read().map_err(|_| StoreError::Poisoned)?;
        Ok(sessions.get(user_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mood;
    use chrono::Utc;

    #[test]
    fn test_moods_are_isolated_per_user() {
        let store = MemoryStore::new();
        store
            .append_mood(MoodRecord::new("alice".into(), Mood::Happy, None, Utc::now()))
            .unwrap();
        store
            .append_mood(MoodRecord::new("bob".into(), Mood::Sad, None, Utc::now()))
            .unwrap();

        let alice = store.moods_for_user("alice").unwrap();
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].mood, Mood::Happy);
        assert!(store.moods_for_user("carol").unwrap().is_empty());
    }

    #[test]
    fn test_appends_preserve_insertion_order() {
        let store = MemoryStore::new();
        for mood in [Mood::Happy, Mood::Calm, Mood::Sad] {
            store
                .append_mood(MoodRecord::new("u".into(), mood, None, Utc::now()))
                .unwrap();
        }
        let moods: Vec<Mood> = store
            .moods_for_user("u")
            .unwrap()
            .into_iter()
            .map(|r| r.mood)
            .collect();
        assert_eq!(moods, vec![Mood::Happy, Mood::Calm, Mood::Sad]);
    }

    #[test]
    fn test_each_save_appends_a_new_session() {
        let store = MemoryStore::new();
        let now = Utc::now();
        store
            .append_session(ChatSession::new("u".into(), vec![], now))
            .unwrap();
        store
            .append_session(ChatSession::new("u".into(), vec![], now))
            .unwrap();
        assert_eq!(store.sessions_for_user("u").unwrap().len(), 2);
    }
}
