//! Goal-coaching agent workflow.
//!
//! A small fixed workflow: load the user's goals, decide whether any exist,
//! and finish in exactly one of two terminal branches - an LLM-written
//! summary or a canned "set your goals first" reply.
//!
//! - [`GoalAgent`] - the workflow engine itself
//! - [`AgentService`] - the boundary the transport layer calls: run the
//!   engine, persist the reply as chat history, serve history reads

mod service;
mod state;
mod workflow;

pub use service::AgentService;
pub use state::{Message, Role, WorkflowState};
pub use workflow::GoalAgent;

use crate::ai::CompletionError;
use crate::store::StoreError;

/// Agent error types.
///
/// Infrastructure failures propagate; business cases (no goals, malformed
/// goals data) are terminal branches, never errors.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("goal store error: {0}")]
    Store(#[from] StoreError),

    #[error("completion call failed: {0}")]
    Completion(#[from] CompletionError),
}
