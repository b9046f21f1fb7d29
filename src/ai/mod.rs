//! Text-completion integration.
//!
//! The agent workflow and the relevance checker both talk to an abstract
//! text-completion service; [`GeminiProvider`] is the concrete adapter.

mod gemini;

pub use gemini::GeminiProvider;

use async_trait::async_trait;

/// Trait for text-completion providers.
///
/// A provider takes a fixed system instruction plus one user turn and
/// returns the generated text. Implementations must be cheap to share
/// behind an `Arc` across concurrent invocations.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Run one completion call and return the generated text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Completion error types.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("{0} not set in environment")]
    MissingApiKey(&'static str),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("no text in provider response")]
    Empty,
}
