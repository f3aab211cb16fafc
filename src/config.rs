use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    /// Empty key disables the generative service; the lexicon classifier
    /// then handles all mood detection and the insights summary is omitted.
    pub generative_api_key: String,
    pub generative_model: String,
    pub generative_timeout_secs: u64,

    /// Optional newline-delimited crisis phrase list; built-in defaults
    /// apply when unset.
    pub crisis_phrases_path: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5001".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),

            generative_api_key: env::var("GENERATIVE_API_KEY").unwrap_or_else(|_| String::new()),
            generative_model: env::var("GENERATIVE_MODEL")
                .unwrap_or_else(|_| "claude-sonnet-4-20250514".into()),
            generative_timeout_secs: env::var("GENERATIVE_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .unwrap_or(30),

            crisis_phrases_path: env::var("CRISIS_PHRASES_PATH")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn generative_enabled(&self) -> bool {
        !self.generative_api_key.is_empty()
    }
}
