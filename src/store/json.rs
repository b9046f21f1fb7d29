//! File-backed document store.
//!
//! Persists goals and chat history in a single pretty-printed JSON file.
//! This is the backend the CLI binary uses; anything heavier should
//! implement [`DocumentStore`] against a real database.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ChatRecord, DocumentStore, GoalDocument, NewChat, StoreError};

/// Document store over a single JSON file.
pub struct JsonFileStore {
    /// Path to the data file
    path: PathBuf,
    /// Full file contents, written back after every mutation
    data: RwLock<StoreData>,
}

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    goals: Vec<GoalDocument>,
    #[serde(default)]
    chats: Vec<ChatRecord>,
    /// Version for future migrations
    #[serde(default)]
    version: u32,
}

impl JsonFileStore {
    /// Open a store at the given path, loading existing data if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let data = Self::load_or_default(&path)?;
        Ok(Self { path, data: RwLock::new(data) })
    }

    fn load_or_default(path: &Path) -> Result<StoreData, StoreError> {
        if !path.exists() {
            return Ok(StoreData::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Apply a mutation stage-then-commit: the staged copy is written to
    /// disk first and only replaces the in-memory data once the write
    /// succeeds, so a failed save never leaves memory ahead of disk.
    fn commit(&self, mutate: impl FnOnce(&mut StoreData)) -> Result<(), StoreError> {
        let mut staged = self.data.read().clone();
        mutate(&mut staged);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&staged)?;
        fs::write(&self.path, raw)?;

        *self.data.write() = staged;
        Ok(())
    }

    /// Insert or replace the goals document for a user and persist.
    pub fn put_goals(&self, doc: GoalDocument) -> Result<(), StoreError> {
        self.commit(|data| {
            data.goals.retain(|g| g.user_id != doc.user_id);
            data.goals.push(doc);
        })
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn find_goals(&self, user_id: &str) -> Result<Option<GoalDocument>, StoreError> {
        Ok(self.data.read().goals.iter().find(|g| g.user_id == user_id).cloned())
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
        self.commit(|data| data.chats.push(record))?;
        Ok(id)
    }

    async fn find_chat(&self, id: &str) -> Result<Option<ChatRecord>, StoreError> {
        Ok(self.data.read().chats.iter().find(|c| c.id == id).cloned())
    }

    async fn chats_for_user(&self, user_id: &str) -> Result<Vec<ChatRecord>, StoreError> {
        let mut chats: Vec<ChatRecord> = self
            .data
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
