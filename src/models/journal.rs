use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-text journal note. Immutable; the store only appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub user_id: String,
    pub date: NaiveDate,
    pub entry: String,
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(user_id: String, entry: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date: timestamp.date_naive(),
            entry,
            timestamp,
        }
    }
}
