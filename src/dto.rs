//! # MindMate — Request/Response DTOs
//!
//! All API contract types in one module.
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Validation is expressed via `validator` derive macros where possible;
//!   cross-field rules get explicit helper methods
//! - `user_id` is an opaque, pre-authenticated identifier supplied by the
//!   external identity provider — it is never interpreted here

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::engine::timeline::{MoodCount, TimelineEntry, TopicMoodCorrelation};
use crate::models::{ChatMessage, Mood};

// ============================================================================
// Chat
// ============================================================================

/// POST /api/chat
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequest {
    #[validate(length(min = 1, max = 128, message = "user_id must be 1-128 characters"))]
    pub user_id: String,

    #[validate(length(min = 1, max = 4000, message = "Message must be 1-4000 characters"))]
    pub message: String,

    /// Prior conversation turns, oldest first.
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,

    /// Absent when the crisis gate fired; the `crisis` flag is deliberately
    /// not a mood value so analytics never count it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,

    pub crisis: bool,
}

/// POST /api/chat/save
#[derive(Debug, Deserialize, Validate)]
pub struct SaveChatRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,

    #[validate(length(min = 1, message = "Messages must not be empty"))]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct SaveChatResponse {
    pub session_id: Uuid,
    pub saved: bool,
}

// ============================================================================
// Mood
// ============================================================================

/// POST /api/moods
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMoodRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,

    /// One of the six mood words; rejected at this boundary otherwise.
    #[validate(length(min = 1, message = "Mood is required"))]
    pub mood: String,

    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub note: Option<String>,
}

impl CreateMoodRequest {
    /// Out-of-enum values never reach the store.
    pub fn parsed_mood(&self) -> Result<Mood, String> {
        self.mood.parse().map_err(|_| {
            format!(
                "Mood must be one of: happy, calm, neutral, anxious, sad, stressed (got {:?})",
                self.mood
            )
        })
    }
}

#[derive(Debug, Serialize)]
pub struct CreateMoodResponse {
    pub success: bool,
    pub record_id: Uuid,
    pub mood: Mood,
}

/// POST /api/detect-mood
#[derive(Debug, Deserialize, Validate)]
pub struct DetectMoodRequest {
    #[validate(length(min = 1, max = 5000, message = "Text must be 1-5000 characters"))]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct DetectMoodResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Mood>,

    pub crisis: bool,

    /// The fixed safety message, present only when `crisis` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Journal
// ============================================================================

/// POST /api/journal
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJournalRequest {
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,

    #[validate(length(min = 1, max = 10000, message = "Entry must be 1-10000 characters"))]
    pub entry: String,
}

#[derive(Debug, Serialize)]
pub struct CreateJournalResponse {
    pub saved: bool,
    pub entry_id: Uuid,
    pub crisis: bool,

    /// The fixed safety message, present only when `crisis` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// Insights
// ============================================================================

/// One topic row in the insights payload, with the plurality mood already
/// resolved for display.
#[derive(Debug, Serialize)]
pub struct TopicInsight {
    pub topic: String,
    pub counts: Vec<MoodCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plurality_mood: Option<Mood>,
}

impl From<TopicMoodCorrelation> for TopicInsight {
    fn from(c: TopicMoodCorrelation) -> Self {
        let plurality_mood = c.plurality_mood();
        Self {
            topic: c.topic,
            counts: c.counts,
            plurality_mood,
        }
    }
}

/// GET /api/insights/{user_id}
#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub timeline: Vec<TimelineEntry>,
    pub topics: Vec<TopicInsight>,

    /// Best-effort AI summary; omitted whenever the generative call fails,
    /// times out, or is not configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// "generative" when the summary came from the AI service, "fallback"
    /// otherwise.
    pub source: String,
}

// ============================================================================
// Validation helpers
// ============================================================================

/// Flatten `validator` errors into the single-line message the error
/// envelope carries.
pub fn validation_message(errors: &validator::ValidationErrors) -> String {
    let mut parts: Vec<String> = Vec::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            match &err.message {
                Some(msg) => parts.push(msg.to_string()),
                None => parts.push(format!("{} is invalid", field)),
            }
        }
    }
    parts.sort();
    parts.join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_request_rejects_out_of_enum_value() {
        let req = CreateMoodRequest {
            user_id: "u1".into(),
            mood: "furious".into(),
            note: None,
        };
        assert!(req.parsed_mood().is_err());
    }

    #[test]
    fn test_mood_request_accepts_enum_value() {
        let req = CreateMoodRequest {
            user_id: "u1".into(),
            mood: "Anxious".into(),
            note: None,
        };
        assert_eq!(req.parsed_mood().unwrap(), Mood::Anxious);
    }

    #[test]
    fn test_crisis_chat_response_omits_mood_field() {
        let resp = ChatResponse {
            reply: "stay with me".into(),
            mood: None,
            crisis: true,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(
            json.get("mood").is_none(),
            "mood must not appear on crisis responses"
        );
        assert_eq!(json["crisis"], true);
    }
}
