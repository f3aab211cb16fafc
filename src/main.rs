use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod dto;
mod engine;
mod error;
mod handlers;
mod llm;
mod models;
mod store;

use config::Config;
use engine::{CrisisDetector, FallbackDetector, GenerativeDetector, MoodDetect};
use llm::GenerativeClient;
use store::{MemoryStore, MoodStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MoodStore>,
    pub config: Arc<Config>,
    pub crisis: Arc<CrisisDetector>,
    pub detector: Arc<FallbackDetector>,
    pub llm: Option<Arc<GenerativeClient>>,
}

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .expect("FRONTEND_URL must be a valid origin"),
        )
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT]);

    Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/readyz", get(handlers::health::readyz))
        // Chat
        .route("/api/chat", post(handlers::chat::chat))
        .route("/api/chat/save", post(handlers::chat::save_chat))
        .route("/api/chat/history/:user_id", get(handlers::chat::chat_history))
        // Moods
        .route("/api/moods", post(handlers::moods::create_mood))
        .route("/api/moods/:user_id", get(handlers::moods::list_moods))
        .route("/api/detect-mood", post(handlers::moods::detect_mood))
        .route("/api/mood-patterns/:user_id", get(handlers::moods::mood_patterns))
        // Journal
        .route("/api/journal", post(handlers::journal::create_journal))
        .route("/api/journal/:user_id", get(handlers::journal::list_journal))
        // Insights
        .route("/api/insights/:user_id", get(handlers::insights::get_insights))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindmate_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let crisis = match &config.crisis_phrases_path {
        Some(path) => CrisisDetector::from_file(std::path::Path::new(path))
            .expect("Failed to read CRISIS_PHRASES_PATH"),
        None => CrisisDetector::new(),
    };
    if crisis.is_empty() {
        // Fail open by contract, but an empty list is a misconfiguration.
        tracing::warn!("crisis phrase list is empty; crisis detection will never trigger");
    }

    let llm = if config.generative_enabled() {
        let client = GenerativeClient::new(
            config.generative_api_key.clone(),
            config.generative_model.clone(),
            std::time::Duration::from_secs(config.generative_timeout_secs),
        )
        .expect("Failed to build generative API client");
        Some(Arc::new(client))
    } else {
        tracing::warn!("GENERATIVE_API_KEY not set; running with lexicon-only mood detection");
        None
    };

    let primary: Option<Arc<dyn MoodDetect>> = llm
        .as_ref()
        .map(|client| Arc::new(GenerativeDetector::new(client.clone())) as Arc<dyn MoodDetect>);
    let detector = FallbackDetector::new(
        primary,
        std::time::Duration::from_secs(config.generative_timeout_secs),
    );

    let state = AppState {
        store: Arc::new(MemoryStore::new()),
        config: config.clone(),
        crisis: Arc::new(crisis),
        detector: Arc::new(detector),
        llm,
    };

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app(state)).await.unwrap();
}
