//! Gemini API integration.
//!
//! Implements the TextCompletion trait for Google Gemini.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionError, TextCompletion};

const API_KEY_VAR: &str = "GOOGLE_API_KEY";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini API provider.
pub struct GeminiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    ///
    /// Reads the API key from the GOOGLE_API_KEY environment variable and
    /// the model from GEMINI_MODEL (falling back to gemini-2.5-flash).
    /// Fails at construction time when the key is absent, not per request.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or(CompletionError::MissingApiKey(API_KEY_VAR))?;

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self::new(api_key)?.with_model(model))
    }

    /// Create a provider with an explicit API key.
    ///
    /// Fails if the HTTP client cannot be built; the client always carries
    /// the request timeout, never a degraded configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self, CompletionError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
        })
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create with a specific base URL (for tests or proxies).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Create with a specific sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Make a generateContent request to the Gemini API.
    async fn request(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let request = GeminiRequest {
            system_instruction: Content::text(system),
            contents: vec![Turn { role: "user".to_string(), parts: vec![Part::text(user)] }],
            generation_config: GenerationConfig { temperature: self.temperature },
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let response: GeminiResponse = response.json().await?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or(CompletionError::Empty)
    }
}

#[async_trait]
impl TextCompletion for GeminiProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        self.request(system, user).await
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Gemini generateContent request structure.
#[derive(Debug, Serialize)]
struct GeminiRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Turn>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// A role-tagged turn in a Gemini conversation.
#[derive(Debug, Serialize)]
struct Turn {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn text(text: &str) -> Self {
        Self { parts: vec![Part::text(text)] }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

impl Part {
    fn text(text: &str) -> Self {
        Self { text: text.to_string() }
    }
}

/// Gemini generateContent response structure.
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}
