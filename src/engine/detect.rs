//! Text → mood detection as a two-variant strategy.
//!
//! The generative service is asked first; the lexicon classifier answers
//! whenever that call fails, times out, returns an out-of-vocabulary word,
//! or is not configured at all. The composer is total: it always yields one
//! of the six labels.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use super::lexicon::classify_mood;
use crate::llm::GenerativeClient;
use crate::models::Mood;

#[async_trait]
pub trait MoodDetect: Send + Sync {
    async fn detect(&self, text: &str) -> Result<Mood>;
}

/// Asks the generative service to name one of the six mood words.
pub struct GenerativeDetector {
    client: Arc<GenerativeClient>,
}

impl GenerativeDetector {
    pub fn new(client: Arc<GenerativeClient>) -> Self {
        Self { client }
    }
}

const DETECT_SYSTEM_PROMPT: &str = "You label the emotional tone of short texts. Respond with exactly one lowercase word from this set and nothing else: happy, calm, neutral, anxious, sad, stressed.";

#[async_trait]
impl MoodDetect for GenerativeDetector {
    async fn detect(&self, text: &str) -> Result<Mood> {
        let answer = self.client.complete(DETECT_SYSTEM_PROMPT, text).await?;
        // An out-of-vocabulary reply is a failure, not a guess.
        Ok(Mood::from_str(&answer)?)
    }
}

/// Infallible wrapper over the lexicon classifier.
pub struct LexiconDetector;

#[async_trait]
impl MoodDetect for LexiconDetector {
    async fn detect(&self, text: &str) -> Result<Mood> {
        Ok(classify_mood(text))
    }
}

/// Primary-with-fallback composer. The primary is optional (no API key
/// configured means lexicon-only operation) and bounded by a timeout; the
/// lexicon answers whenever the primary does not.
pub struct FallbackDetector {
    primary: Option<Arc<dyn MoodDetect>>,
    fallback: LexiconDetector,
    timeout: Duration,
}

impl FallbackDetector {
    pub fn new(primary: Option<Arc<dyn MoodDetect>>, timeout: Duration) -> Self {
        Self {
            primary,
            fallback: LexiconDetector,
            timeout,
        }
    }

    pub fn lexicon_only() -> Self {
        Self::new(None, Duration::ZERO)
    }

    /// Total: always returns a valid label.
    pub async fn detect(&self, text: &str) -> Mood {
        if let Some(primary) = &self.primary {
            match tokio::time::timeout(self.timeout, primary.detect(text)).await {
                Ok(Ok(mood)) => return mood,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "primary mood detector failed, using lexicon fallback");
                }
                Err(_) => {
                    tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "primary mood detector timed out, using lexicon fallback");
                }
            }
        }
        self.fallback.detect(text).await.unwrap_or(Mood::Neutral)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(Mood);

    #[async_trait]
    impl MoodDetect for FixedDetector {
        async fn detect(&self, _text: &str) -> Result<Mood> {
            Ok(self.0)
        }
    }

    struct FailingDetector;

    #[async_trait]
    impl MoodDetect for FailingDetector {
        async fn detect(&self, _text: &str) -> Result<Mood> {
            anyhow::bail!("service unavailable")
        }
    }

    struct SlowDetector;

    #[async_trait]
    impl MoodDetect for SlowDetector {
        async fn detect(&self, _text: &str) -> Result<Mood> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Mood::Happy)
        }
    }

    #[tokio::test]
    async fn test_primary_answer_wins() {
        let detector = FallbackDetector::new(
            Some(Arc::new(FixedDetector(Mood::Calm))),
            Duration::from_secs(1),
        );
        // Text that the lexicon would call sad; the primary overrides.
        assert_eq!(detector.detect("feeling lonely").await, Mood::Calm);
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_lexicon() {
        let detector =
            FallbackDetector::new(Some(Arc::new(FailingDetector)), Duration::from_secs(1));
        assert_eq!(detector.detect("I am so happy and excited").await, Mood::Happy);
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_lexicon() {
        let detector =
            FallbackDetector::new(Some(Arc::new(SlowDetector)), Duration::from_millis(20));
        assert_eq!(detector.detect("feeling lonely").await, Mood::Sad);
    }

    #[tokio::test]
    async fn test_no_primary_uses_lexicon() {
        let detector = FallbackDetector::lexicon_only();
        assert_eq!(detector.detect("").await, Mood::Neutral);
    }

    #[tokio::test]
    async fn test_lexicon_detector_never_fails() {
        let mood = LexiconDetector.detect("complete nonsense !!").await.unwrap();
        assert!(Mood::ORDER.contains(&mood));
    }
}
