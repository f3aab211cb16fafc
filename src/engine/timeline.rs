//! Chat/journal correlation: the unified activity timeline, naive topic
//! extraction, and the topic→mood co-occurrence table behind the insights
//! view.
//!
//! Everything here is pure and synchronous; the optional AI-written summary
//! that accompanies this data is requested by the insights handler and can
//! fail without affecting any of these results.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::lexicon::classify_mood;
use crate::models::{ChatSession, JournalEntry, Mood, MoodRecord};

/// Timeline and correlation look back this many days.
const WINDOW_DAYS: i64 = 7;

/// The timeline keeps only the newest entries after sorting.
const TIMELINE_CAP: usize = 14;

/// Preview length in characters, before the ellipsis.
const PREVIEW_CHARS: usize = 100;

/// At most this many topics per text block.
const TOPIC_LIMIT: usize = 3;

/// Tokens shorter than this are discarded before counting.
const MIN_TOKEN_CHARS: usize = 5;

/// Filler words excluded from topic extraction. Tokens under
/// `MIN_TOKEN_CHARS` are dropped by the length rule regardless; the short
/// entries here document intent. Emotion verbs are stop-worded because
/// nearly every journal line contains them.
const STOP_WORDS: &[&str] = &[
    "the", "and", "that", "this", "these", "those", "with", "from", "about", "into", "over",
    "under", "after", "before", "again", "there", "here", "where", "when", "while", "because",
    "could", "would", "should", "might", "shall", "have", "has", "had", "been", "being", "were",
    "will", "just", "really", "very", "today", "always", "never", "maybe", "think", "thing",
    "things", "going", "want", "wanted", "like", "know", "feel", "feels", "feeling", "felt",
    "myself", "their", "them", "they", "your", "yours", "every", "everything", "something",
    "anything", "nothing", "still", "around", "through", "little", "quite", "which", "what",
    "another", "other", "others",
];

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Chat,
    Journal,
}

/// One row of the merged activity view.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub date: NaiveDate,
    pub mood: Mood,
    pub content_preview: String,
    /// Id of the underlying session or journal entry.
    pub source_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: u32,
}

/// How often each mood co-occurred with a topic across recent chat sessions.
#[derive(Debug, Clone, Serialize)]
pub struct TopicMoodCorrelation {
    pub topic: String,
    /// Non-zero counts, in `Mood::ORDER`.
    pub counts: Vec<MoodCount>,
}

impl TopicMoodCorrelation {
    /// The mood most often present when this topic came up. Ties resolve to
    /// the earliest mood in `Mood::ORDER`, matching the counts ordering.
    pub fn plurality_mood(&self) -> Option<Mood> {
        let mut best: Option<&MoodCount> = None;
        for mc in &self.counts {
            match best {
                Some(top) if mc.count <= top.count => {}
                _ => best = Some(mc),
            }
        }
        best.map(|mc| mc.mood)
    }
}

/// Merge chat sessions and journal entries from the last 7 days into one
/// chronological view, ascending by date, capped to the newest 14 entries.
///
/// Chat moods come from the classifier over the session's user-authored text;
/// journal moods are looked up from a mood record sharing the entry's
/// calendar date, defaulting to neutral.
pub fn build_timeline(
    sessions: &[ChatSession],
    entries: &[JournalEntry],
    mood_records: &[MoodRecord],
    now: DateTime<Utc>,
) -> Vec<TimelineEntry> {
    let cutoff = now - Duration::days(WINDOW_DAYS);

    let mut timeline: Vec<TimelineEntry> = Vec::new();

    for session in sessions.iter().filter(|s| s.created_at > cutoff) {
        let user_text = session.user_text();
        timeline.push(TimelineEntry {
            kind: EntryKind::Chat,
            date: session.created_at.date_naive(),
            mood: classify_mood(&user_text),
            content_preview: preview(&user_text),
            source_id: session.id,
            timestamp: session.created_at,
        });
    }

    for entry in entries.iter().filter(|e| e.timestamp > cutoff) {
        let mood = mood_records
            .iter()
            .find(|r| r.date == entry.date)
            .map(|r| r.mood)
            .unwrap_or(Mood::Neutral);
        timeline.push(TimelineEntry {
            kind: EntryKind::Journal,
            date: entry.date,
            mood,
            content_preview: preview(&entry.entry),
            source_id: entry.id,
            timestamp: entry.timestamp,
        });
    }

    timeline.sort_by_key(|e| e.timestamp);
    if timeline.len() > TIMELINE_CAP {
        timeline.drain(..timeline.len() - TIMELINE_CAP);
    }
    timeline
}

/// Up to three representative keywords: word-boundary tokens, minus stop
/// words and short tokens, ranked by frequency. The sort is stable, so equal
/// frequencies keep first-encountered order.
pub fn extract_topics(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for token in lower.split(|c: char| !c.is_alphanumeric()) {
        if token.chars().count() < MIN_TOKEN_CHARS || STOP_WORDS.contains(&token) {
            continue;
        }
        match counts.iter_mut().find(|(t, _)| *t == token) {
            Some((_, n)) => *n += 1,
            None => counts.push((token, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .take(TOPIC_LIMIT)
        .map(|(t, _)| t.to_string())
        .collect()
}

/// Topic → mood co-occurrence over the last 7 days of chat sessions. Topics
/// appear in first-encounter order; each topic's counts in `Mood::ORDER`.
pub fn correlate_topics(sessions: &[ChatSession], now: DateTime<Utc>) -> Vec<TopicMoodCorrelation> {
    let cutoff = now - Duration::days(WINDOW_DAYS);

    // topic -> per-mood tally, indexed by Mood::ORDER position.
    let mut table: Vec<(String, [u32; 6])> = Vec::new();

    for session in sessions.iter().filter(|s| s.created_at > cutoff) {
        let user_text = session.user_text();
        let mood = classify_mood(&user_text);
        let mood_idx = Mood::ORDER.iter().position(|m| *m == mood).unwrap_or(0);

        for topic in extract_topics(&user_text) {
            match table.iter_mut().find(|(t, _)| *t == topic) {
                Some((_, tally)) => tally[mood_idx] += 1,
                None => {
                    let mut tally = [0u32; 6];
                    tally[mood_idx] = 1;
                    table.push((topic, tally));
                }
            }
        }
    }

    table
        .into_iter()
        .map(|(topic, tally)| TopicMoodCorrelation {
            topic,
            counts: Mood::ORDER
                .iter()
                .enumerate()
                .filter(|(i, _)| tally[*i] > 0)
                .map(|(i, mood)| MoodCount {
                    mood: *mood,
                    count: tally[i],
                })
                .collect(),
        })
        .collect()
}

fn preview(text: &str) -> String {
    let mut out: String = text.chars().take(PREVIEW_CHARS).collect();
    if text.chars().count() > PREVIEW_CHARS {
        out.push('…');
    }
    out
}
