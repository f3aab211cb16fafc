use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{validation_message, ChatRequest, ChatResponse, SaveChatRequest, SaveChatResponse};
use crate::engine::SAFETY_MESSAGE;
use crate::error::{AppError, AppResult};
use crate::models::{ChatSession, MoodRecord};
use crate::AppState;

/// Canned reply when the generative service is down or not configured. The
/// conversation degrades, it does not fail.
const FALLBACK_REPLY: &str = "I'm having trouble connecting right now, but I'm still here with you. Could you tell me more about what's on your mind?";

pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))?;

    // Crisis gate runs before any mood or LLM processing and suppresses both.
    if state.crisis.detect(&body.message) {
        tracing::info!(user_id = %body.user_id, "crisis phrases detected, returning safety response");
        return Ok(Json(ChatResponse {
            reply: SAFETY_MESSAGE.into(),
            mood: None,
            crisis: true,
        }));
    }

    let reply = match &state.llm {
        Some(llm) => match llm.reply(&body.history, &body.message).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "generative service unavailable, using fallback reply");
                FALLBACK_REPLY.into()
            }
        },
        None => FALLBACK_REPLY.into(),
    };

    let mood = state.detector.detect(&body.message).await;

    // Chat mood detection doubles as a check-in: append a record so the
    // aggregation endpoints see conversational signals too.
    state
        .store
        .append_mood(MoodRecord::new(body.user_id, mood, None, Utc::now()))?;

    Ok(Json(ChatResponse {
        reply,
        mood: Some(mood),
        crisis: false,
    }))
}

/// Each call appends a whole new session — the reference system's behavior,
/// kept deliberately rather than upserting by session id (see DESIGN.md).
pub async fn save_chat(
    State(state): State<AppState>,
    Json(body): Json<SaveChatRequest>,
) -> AppResult<Json<SaveChatResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))?;

    let session = ChatSession::new(body.user_id, body.messages, Utc::now());
    let session_id = session.id;
    state.store.append_session(session)?;

    Ok(Json(SaveChatResponse {
        session_id,
        saved: true,
    }))
}

pub async fn chat_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<ChatSession>>> {
    let mut sessions = state.store.sessions_for_user(&user_id)?;
    sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(sessions))
}
