//! Adapter for the external generative-AI text service.
//!
//! The service is an opaque collaborator: given a prompt it returns text or
//! fails. Every call site treats failure as recoverable — mood detection
//! falls back to the lexicon classifier and the insights summary is simply
//! omitted — so nothing in here is allowed to take the request down.

use anyhow::Result;
use serde_json::json;

use crate::models::{ChatMessage, Role};

/// The companion's voice, sent as the system prompt on conversational calls.
const COMPANION_SYSTEM_PROMPT: &str = "You are MindMate, a compassionate and empathetic AI companion for mental wellness. Listen actively, respond with warmth and validation, ask thoughtful follow-up questions, and suggest healthy coping strategies when appropriate. Never diagnose or replace professional therapy. Keep responses warm, conversational, and supportive, typically 2-4 sentences.";

pub struct GenerativeClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl GenerativeClient {
    pub fn new(api_key: String, model: String, timeout: std::time::Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_url: "https://api.anthropic.com/v1/messages".into(),
            api_key,
            model,
        })
    }

    /// One-shot completion for a single user prompt.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        self.request(system, &[json!({ "role": "user", "content": prompt })])
            .await
    }

    /// Conversational reply: prior turns plus the new user message.
    pub async fn reply(&self, history: &[ChatMessage], message: &str) -> Result<String> {
        let mut messages: Vec<serde_json::Value> = history
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };
                json!({ "role": role, "content": m.content })
            })
            .collect();
        messages.push(json!({ "role": "user", "content": message }));
        self.request(COMPANION_SYSTEM_PROMPT, &messages).await
    }

    async fn request(&self, system: &str, messages: &[serde_json::Value]) -> Result<String> {
        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&json!({
                "model": self.model,
                "max_tokens": 1024,
                "system": system,
                "messages": messages,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("generative API error {}: {}", status, body);
        }

        let body: serde_json::Value = response.json().await?;
        let text = body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("generative API returned no text content"))?;
        Ok(text.to_string())
    }
}
