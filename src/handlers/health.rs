use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "MindMate API is running!" }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "mindmate-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    // The service stays up without the generative key (lexicon-only mode)
    // and with an empty crisis list (fail open); readiness just reports both.
    (
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "checks": {
                "crisis_phrases": !state.crisis.is_empty(),
                "generative": state.llm.is_some(),
            },
        })),
    )
}
