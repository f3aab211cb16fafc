use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use validator::Validate;

use crate::dto::{validation_message, CreateJournalRequest, CreateJournalResponse};
use crate::engine::SAFETY_MESSAGE;
use crate::error::{AppError, AppResult};
use crate::models::JournalEntry;
use crate::AppState;

pub async fn create_journal(
    State(state): State<AppState>,
    Json(body): Json<CreateJournalRequest>,
) -> AppResult<Json<CreateJournalResponse>> {
    body.validate()
        .map_err(|e| AppError::Validation(validation_message(&e)))?;

    // The entry is the user's own record and is kept either way; a crisis
    // match only suppresses downstream mood processing and swaps the
    // acknowledgment for the safety payload.
    let crisis = state.crisis.detect(&body.entry);
    if crisis {
        tracing::info!(user_id = %body.user_id, "crisis phrases detected in journal entry");
    }

    let entry = JournalEntry::new(body.user_id, body.entry, Utc::now());
    let entry_id = entry.id;
    state.store.append_journal(entry)?;

    Ok(Json(CreateJournalResponse {
        saved: true,
        entry_id,
        crisis,
        message: crisis.then(|| SAFETY_MESSAGE.to_string()),
    }))
}

pub async fn list_journal(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<JournalEntry>>> {
    let entries = state.store.journal_for_user(&user_id)?;
    Ok(Json(entries))
}
