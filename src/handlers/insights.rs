use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::dto::{InsightsResponse, TopicInsight};
use crate::engine::{build_timeline, correlate_topics, TimelineEntry};
use crate::error::AppResult;
use crate::AppState;

const SUMMARY_SYSTEM_PROMPT: &str = "You are MindMate, a supportive mental-wellness companion. Given a week of a user's mood-tagged chat and journal activity, write a warm 2-3 sentence reflection on how their week went, naming one pattern you notice. Do not diagnose. Address the user as 'you'.";

/// Excerpts sent to the summarizer are clipped to keep the prompt bounded.
const EXCERPT_CHARS: usize = 200;

pub async fn get_insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<InsightsResponse>> {
    let now = Utc::now();

    let sessions = state.store.sessions_for_user(&user_id)?;
    let entries = state.store.journal_for_user(&user_id)?;
    let mood_records = state.store.moods_for_user(&user_id)?;

    let timeline = build_timeline(&sessions, &entries, &mood_records, now);
    let topics: Vec<TopicInsight> = correlate_topics(&sessions, now)
        .into_iter()
        .map(Into::into)
        .collect();

    // Best-effort: a summarizer failure or timeout degrades the payload to
    // timeline + topics only, it never fails the request.
    let summary = match &state.llm {
        Some(llm) if !timeline.is_empty() => {
            let prompt = summary_prompt(&timeline, &topics);
            let deadline = std::time::Duration::from_secs(state.config.generative_timeout_secs);
            match tokio::time::timeout(deadline, llm.complete(SUMMARY_SYSTEM_PROMPT, &prompt)).await
            {
                Ok(Ok(text)) => Some(text),
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "insight summary unavailable");
                    None
                }
                Err(_) => {
                    tracing::warn!("insight summary timed out");
                    None
                }
            }
        }
        _ => None,
    };

    let source = if summary.is_some() {
        "generative"
    } else {
        "fallback"
    };

    Ok(Json(InsightsResponse {
        timeline,
        topics,
        summary,
        source: source.into(),
    }))
}

fn summary_prompt(timeline: &[TimelineEntry], topics: &[TopicInsight]) -> String {
    let activity: Vec<String> = timeline
        .iter()
        .map(|e| {
            let excerpt: String = e.content_preview.chars().take(EXCERPT_CHARS).collect();
            format!("- {} {:?} (mood: {}): {}", e.date, e.kind, e.mood, excerpt)
        })
        .collect();

    let topic_lines: Vec<String> = topics
        .iter()
        .map(|t| match t.plurality_mood {
            Some(mood) => format!("- {} (mostly {})", t.topic, mood),
            None => format!("- {}", t.topic),
        })
        .collect();

    format!(
        "This week's activity:\n{}\n\nRecurring topics:\n{}",
        activity.join("\n"),
        if topic_lines.is_empty() {
            "- none".to_string()
        } else {
            topic_lines.join("\n")
        }
    )
}
