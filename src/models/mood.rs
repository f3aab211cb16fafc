use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of mood labels used throughout storage and analytics.
///
/// Crisis is deliberately NOT a variant: crisis-flagged interactions carry a
/// separate marker so they never enter mood statistics.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Calm,
    Neutral,
    Anxious,
    Sad,
    Stressed,
}

impl Mood {
    /// Canonical enumeration order. Every tie-break in the classifier and the
    /// aggregation engine resolves against this list, never against a map's
    /// iteration order.
    pub const ORDER: [Mood; 6] = [
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Sad,
        Mood::Stressed,
    ];

    /// Wellbeing score in [0,100] used for averaging.
    pub fn score(self) -> u8 {
        match self {
            Mood::Happy => 90,
            Mood::Calm => 75,
            Mood::Neutral => 50,
            Mood::Stressed => 25,
            Mood::Anxious => 30,
            Mood::Sad => 20,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Anxious => "anxious",
            Mood::Sad => "sad",
            Mood::Stressed => "stressed",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = UnknownMood;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "calm" => Ok(Mood::Calm),
            "neutral" => Ok(Mood::Neutral),
            "anxious" => Ok(Mood::Anxious),
            "sad" => Ok(Mood::Sad),
            "stressed" => Ok(Mood::Stressed),
            other => Err(UnknownMood(other.to_string())),
        }
    }
}

/// Returned when a string is not one of the six mood words. Hit at the write
/// boundary (mood submission) and when the generative detector replies with an
/// out-of-vocabulary word.
#[derive(Debug, thiserror::Error)]
#[error("unknown mood: {0:?}")]
pub struct UnknownMood(pub String);

/// One mood check-in. Immutable once created; the store only appends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodRecord {
    pub id: Uuid,
    pub user_id: String,
    /// Calendar day, derived from `timestamp` at creation.
    pub date: NaiveDate,
    pub mood: Mood,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl MoodRecord {
    pub fn new(user_id: String, mood: Mood, note: Option<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            date: timestamp.date_naive(),
            mood,
            note,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_match_wellbeing_table() {
        assert_eq!(Mood::Happy.score(), 90);
        assert_eq!(Mood::Calm.score(), 75);
        assert_eq!(Mood::Neutral.score(), 50);
        assert_eq!(Mood::Stressed.score(), 25);
        assert_eq!(Mood::Anxious.score(), 30);
        assert_eq!(Mood::Sad.score(), 20);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Happy".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(" stressed ".parse::<Mood>().unwrap(), Mood::Stressed);
    }

    #[test]
    fn test_parse_rejects_out_of_enum_values() {
        assert!("crisis".parse::<Mood>().is_err());
        assert!("ecstatic".parse::<Mood>().is_err());
        assert!("".parse::<Mood>().is_err());
    }

    #[test]
    fn test_record_date_derived_from_timestamp() {
        let ts = "2026-08-03T22:15:00Z".parse::<DateTime<Utc>>().unwrap();
        let rec = MoodRecord::new("u1".into(), Mood::Calm, None, ts);
        assert_eq!(rec.date, ts.date_naive());
    }
}
