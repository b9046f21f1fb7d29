//! Boundary operations for the transport layer.

use std::sync::Arc;

use crate::store::{ChatRecord, DocumentStore, NewChat, StoreError};

use super::workflow::GoalAgent;
use super::AgentError;

/// The agent's exposed boundary: invoke-and-persist plus history reads.
///
/// A transport layer (HTTP, CLI) calls these three operations; everything
/// else stays internal to the engine.
pub struct AgentService {
    agent: GoalAgent,
    store: Arc<dyn DocumentStore>,
}

impl AgentService {
    /// Create a service over an engine and the chat-history store.
    pub fn new(agent: GoalAgent, store: Arc<dyn DocumentStore>) -> Self {
        Self { agent, store }
    }

    /// Run the workflow for a user and persist the agent's reply.
    ///
    /// Exactly one chat record (the agent's reply) is written per successful
    /// invocation; a failed invocation persists nothing. The freshly
    /// inserted record is read back and returned.
    pub async fn invoke_for_user(&self, user_id: &str) -> Result<ChatRecord, AgentError> {
        tracing::info!(user_id, "agent invoked");

        let state = self.agent.invoke(user_id).await?;

        let id = self.store.insert_chat(NewChat::agent(user_id, state.response_text)).await?;
        let record = self
            .store
            .find_chat(&id)
            .await?
            .ok_or_else(|| StoreError::Missing(id.clone()))?;

        tracing::info!(user_id, chat_id = %record.id, "agent reply persisted");
        Ok(record)
    }

    /// Chat history for a user, ordered by ascending timestamp.
    pub async fn history(&self, user_id: &str) -> Result<Vec<ChatRecord>, AgentError> {
        Ok(self.store.chats_for_user(user_id).await?)
    }
}
