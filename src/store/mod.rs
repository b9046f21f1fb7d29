//! Document store abstraction.
//!
//! The agent persists chat history and reads goal documents through the
//! [`DocumentStore`] trait; any document-oriented backend satisfies it.
//! Two adapters ship with the crate:
//!
//! - [`MemoryStore`] - in-process, for tests and embedders
//! - [`JsonFileStore`] - single JSON file, used by the CLI

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store error types.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("record {0} missing after insert")]
    Missing(String),
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    User,
    Agent,
}

/// A persisted chat exchange. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Store-generated identifier
    pub id: String,
    /// Owner of the conversation
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Message author
    #[serde(rename = "userType")]
    pub user_type: UserType,
    /// Message text
    pub message: String,
    /// Creation time, assigned by the store
    pub timestamp: DateTime<Utc>,
}

/// A chat message about to be persisted; the store assigns id and timestamp.
#[derive(Debug, Clone)]
pub struct NewChat {
    pub user_id: String,
    pub user_type: UserType,
    pub message: String,
}

impl NewChat {
    /// Create an agent-authored chat message.
    pub fn agent(user_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), user_type: UserType::Agent, message: message.into() }
    }
}

/// A user's stored goals document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalDocument {
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Duck-typed upstream field: historically written as either a single
    /// string or a list of strings. Always read through [`GoalsField::normalize`].
    #[serde(default)]
    pub goals: GoalsField,
}

/// The stored shape of the `goals` field.
///
/// Upstream writers were never consistent about this field, so the store
/// models every shape it has been seen in and funnels all of them through
/// one normalization point. The rest of the engine only ever sees the
/// canonical `Vec<String>` form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalsField {
    /// A single goal written as a bare string
    One(String),
    /// The canonical list-of-strings form
    Many(Vec<String>),
    /// Anything else (wrong type, null); normalizes to no goals
    Other(serde_json::Value),
}

impl Default for GoalsField {
    fn default() -> Self {
        Self::Other(serde_json::Value::Null)
    }
}

impl GoalsField {
    /// Normalize to an ordered sequence of goals.
    ///
    /// A bare string becomes a one-element sequence unless it is empty or
    /// whitespace-only; a list is used as-is; any other shape is treated as
    /// no goals. Order is preserved.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            Self::One(goal) if goal.trim().is_empty() => Vec::new(),
            Self::One(goal) => vec![goal.clone()],
            Self::Many(goals) => goals.clone(),
            Self::Other(_) => Vec::new(),
        }
    }
}

/// Trait for document-oriented persistence backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up the goals document for a user, if any.
    async fn find_goals(&self, user_id: &str) -> Result<Option<GoalDocument>, StoreError>;

    /// Append a chat record; returns the generated id.
    async fn insert_chat(&self, chat: NewChat) -> Result<String, StoreError>;

    /// Fetch a single chat record by id.
    async fn find_chat(&self, id: &str) -> Result<Option<ChatRecord>, StoreError>;

    /// All chat records for a user, ordered by ascending timestamp.
    async fn chats_for_user(&self, user_id: &str) -> Result<Vec<ChatRecord>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: serde_json::Value) -> GoalsField {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_normalize_single_string() {
        assert_eq!(field(json!("Learn Go")).normalize(), vec!["Learn Go".to_string()]);
    }

    #[test]
    fn test_normalize_empty_string() {
        assert!(field(json!("")).normalize().is_empty());
    }

    #[test]
    fn test_normalize_whitespace_string() {
        assert!(field(json!("   \t ")).normalize().is_empty());
    }

    #[test]
    fn test_normalize_list_as_is() {
        let goals = field(json!(["Learn Rust", "Ship a crate"])).normalize();
        assert_eq!(goals, vec!["Learn Rust".to_string(), "Ship a crate".to_string()]);
    }

    #[test]
    fn test_normalize_empty_list() {
        assert!(field(json!([])).normalize().is_empty());
    }

    #[test]
    fn test_normalize_wrong_type() {
        assert!(field(json!(42)).normalize().is_empty());
        assert!(field(json!({"nested": true})).normalize().is_empty());
        assert!(field(json!(null)).normalize().is_empty());
    }

    #[test]
    fn test_normalize_missing_field() {
        let doc: GoalDocument = serde_json::from_value(json!({"userId": "u1"})).unwrap();
        assert!(doc.goals.normalize().is_empty());
    }

    #[test]
    fn test_user_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&UserType::Agent).unwrap(), "\"agent\"");
        assert_eq!(serde_json::to_string(&UserType::User).unwrap(), "\"user\"");
    }
}
