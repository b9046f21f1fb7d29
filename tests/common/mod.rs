//! Shared test doubles for the integration suites.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use goalmentor::{CompletionError, DocumentStore, GoalDocument, NewChat, StoreError, TextCompletion};

/// Scripted text-completion provider that counts its calls.
pub struct MockCompletion {
    behavior: Behavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

enum Behavior {
    Reply(String),
    Fail,
}

impl MockCompletion {
    /// A provider that always returns the given text.
    pub fn replying(text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Reply(text.into()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    /// A provider whose every call fails.
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            behavior: Behavior::Fail,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    /// Number of completion calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The user prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().clone()
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock() = Some(user.to_string());

        match &self.behavior {
            Behavior::Reply(text) => Ok(text.clone()),
            Behavior::Fail => {
                Err(CompletionError::Api { status: 500, body: "mock outage".to_string() })
            }
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Document store whose every call fails with an I/O error.
pub struct FailingStore;

fn io_failure() -> StoreError {
    StoreError::Io(std::io::Error::new(std::io::ErrorKind::Other, "store down"))
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find_goals(&self, _user_id: &str) -> Result<Option<GoalDocument>, StoreError> {
        Err(io_failure())
    }

    async fn insert_chat(&self, _chat: NewChat) -> Result<String, StoreError> {
        Err(io_failure())
    }

    async fn find_chat(
        &self,
        _id: &str,
    ) -> Result<Option<goalmentor::ChatRecord>, StoreError> {
        Err(io_failure())
    }

    async fn chats_for_user(
        &self,
        _user_id: &str,
    ) -> Result<Vec<goalmentor::ChatRecord>, StoreError> {
        Err(io_failure())
    }
}
