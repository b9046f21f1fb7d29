//! In-process document store.

use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use super::{ChatRecord, DocumentStore, GoalDocument, GoalsField, NewChat, StoreError};

/// In-memory store, primarily for tests and embedders.
///
/// Goals are keyed by user id; chats are kept in insertion order and sorted
/// by timestamp on read.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    goals: HashMap<String, GoalDocument>,
    chats: Vec<ChatRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a goals document for a user.
    pub fn set_goals(&self, user_id: impl Into<String>, goals: GoalsField) {
        let user_id = user_id.into();
        let doc = GoalDocument { user_id: user_id.clone(), goals };
        self.inner.write().goals.insert(user_id, doc);
    }

    /// Seed a goals document from a raw JSON value, exercising the same
    /// duck-typed shapes upstream writers produce.
    pub fn set_goals_value(&self, user_id: impl Into<String>, value: serde_json::Value) {
        let field = serde_json::from_value(value)
            .unwrap_or(GoalsField::Other(serde_json::Value::Null));
        self.set_goals(user_id, field);
    }

    /// Number of persisted chat records across all users.
    pub fn chat_count(&self) -> usize {
        self.inner.read().chats.len()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_goals(&self, user_id: &str) -> Result<Option<GoalDocument>, StoreError> {
        Ok(self.inner.read().goals.get(user_id).cloned())
    }

    async fn insert_chat(&self, chat: NewChat) -> Result<String, StoreError> {
        let record = ChatRecord {
            id: Uuid::new_v4().to_string(),
            user_id: chat.user_id,
            user_type: chat.user_type,
            message: chat.message,
            timestamp: Utc::now(),
        };
        let id = record.id.clone();
        self.inner.write().chats.push(record);
        Ok(id)
    }

    async fn find_chat(&self, id: &str) -> Result<Option<ChatRecord>, StoreError> {
        Ok(self.inner.read().chats.iter().find(|c| c.id == id).cloned())
    }

    async fn chats_for_user(&self, user_id: &str) -> Result<Vec<ChatRecord>, StoreError> {
        let mut chats: Vec<ChatRecord> = self
            .inner
            .read()
            .chats
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        chats.sort_by_key(|c| c.timestamp);
        Ok(chats)
    }
}
