use std::path::Path;

/// Phrases that trigger the crisis safety net. A blunt literal-substring
/// list, not a classifier — the list is a product/safety decision and can be
/// replaced at deploy time without a code change (`CRISIS_PHRASES_PATH`).
const DEFAULT_PHRASES: &[&str] = &[
    "kill myself",
    "end my life",
    "want to die",
    "wish i was dead",
    "suicide",
    "suicidal",
    "self harm",
    "self-harm",
    "hurt myself",
    "harm myself",
    "no reason to live",
    "better off dead",
    "end it all",
    "can't go on",
    "cant go on",
    "no point in living",
    "don't want to be here anymore",
    "life is hopeless",
];

/// Fixed, non-personalized safety response returned whenever the detector
/// fires. Resources mirror the app's crisis page.
pub const SAFETY_MESSAGE: &str = "I'm really glad you told me, and I'm concerned about how much pain you're in right now. You don't have to go through this alone. Please reach out to someone who can help right away: call or text 988 (Suicide & Crisis Lifeline, 24/7), or text HOME to 741741 (Crisis Text Line). If you are in immediate danger, please call 911 or go to your nearest emergency room. You matter, and support is available.";

/// Case-insensitive substring scan over an ordered phrase list.
pub struct CrisisDetector {
    phrases: Vec<String>,
}

impl CrisisDetector {
    pub fn new() -> Self {
        Self {
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Load a newline-delimited phrase list. Blank lines and `#` comments are
    /// skipped. An empty result is reported to the caller so it can be
    /// treated as a configuration error rather than a valid state.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let phrases = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.to_lowercase())
            .collect();
        Ok(Self { phrases })
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// Returns true on the first matching phrase. No scoring. An empty list
    /// matches nothing (fail open).
    pub fn detect(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.phrases.iter().any(|p| lower.contains(p.as_str()))
    }
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}
