use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{
    validation_message, CreateMoodRequest, CreateMoodResponse, DetectMoodRequest,
    DetectMoodResponse,
};
use crate::engine::{aggregate_mood_stats, MoodStats, SAFETY_MESSAGE};
use crate::error::{AppError, AppResult};
use crate::models::MoodRecord;
use crate::AppState;

pub async fn create_mood(
    State(state): State<AppState>,
    Json(body): Json<CreateMoodRequest>,
) -> AppResult<Json<CreateMoodResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))?;
    let mood = body.parsed_mood().map_err(AppError::Validation)?;

    let record = MoodRecord::new(body.user_id, mood, body.note, Utc::now());
    let record_id = record.id;
    state.store.append_mood(record)?;

    Ok(Json(CreateMoodResponse {
        success: true,
        record_id,
        mood,
    }))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<MoodRecord>>> {
    let records = state.store.moods_for_user(&user_id)?;
    Ok(Json(records))
}

pub async fn mood_patterns(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<MoodStats>> {
    let records = state.store.moods_for_user(&user_id)?;
    Ok(Json(aggregate_mood_stats(&records, Utc::now())))
}

/// Stateless detection for the "describe how you feel" box; nothing is
/// persisted until the user explicitly saves a mood.
pub async fn detect_mood(
    State(state): State<AppState>,
    Json(body): Json<DetectMoodRequest>,
) -> AppResult<Json<DetectMoodResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))?;

    if state.crisis.detect(&body.text) {
        return Ok(Json(DetectMoodResponse {
            mood: None,
            crisis: true,
            message: Some(SAFETY_MESSAGE.into()),
        }));
    }

    let mood = state.detector.detect(&body.text).await;
    Ok(Json(DetectMoodResponse {
        mood: Some(mood),
        crisis: false,
        message: None,
    }))
}
