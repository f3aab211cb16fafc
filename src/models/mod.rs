pub mod chat;
pub mod journal;
pub mod mood;

pub use chat::{ChatMessage, ChatSession, Role};
pub use journal::JournalEntry;
pub use mood::{Mood, MoodRecord, UnknownMood};
