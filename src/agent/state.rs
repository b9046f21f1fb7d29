//! Workflow state threaded through one agent invocation.

use serde::{Deserialize, Serialize};

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// A role-tagged message accumulated for audit/history purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create an agent-authored message.
    pub fn agent(content: impl Into<String>) -> Self {
        Self { role: Role::Agent, content: content.into() }
    }
}

/// Mutable state for one workflow invocation.
///
/// Each invocation owns its own state; nothing is shared between
/// concurrent runs. Exactly one terminal branch populates
/// `response_text` and appends its message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// Opaque user identifier, immutable once set
    pub user_id: String,
    /// Normalized goals, populated by the supervisor step
    pub goals: Vec<String>,
    /// Reserved for future branches; unused by the current workflow
    pub active_task: Option<String>,
    /// Final human-readable output, empty until a terminal branch runs
    pub response_text: String,
    /// Messages appended by the terminal branch, append-only
    pub messages: Vec<Message>,
}

impl WorkflowState {
    /// Create the initial state for a user, all other fields at zero values.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            goals: Vec::new(),
            active_task: None,
            response_text: String::new(),
            messages: Vec::new(),
        }
    }
}
