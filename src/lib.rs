//! # Goalmentor
//!
//! Goal-coaching agent service. Routes a user's stored goals through an LLM
//! call to produce a brief encouraging summary, persists the exchange as
//! chat history, and exposes a task/project relevance-filtering helper.
//!
//! ## Architecture
//!
//! - **Workflow engine** ([`agent`]): one store read, one routing decision,
//!   one of two terminal branches (LLM summary or fixed no-goals reply)
//! - **Relevance cache** ([`relevance`]): memoized yes/no relevance checks,
//!   fail-open on provider errors
//! - **Collaborators** ([`ai`], [`store`]): the text-completion service and
//!   the document store are trait objects; any provider/backend plugs in
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use goalmentor::{AgentService, GeminiProvider, GoalAgent, MemoryStore};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(MemoryStore::new());
//! let llm = Arc::new(GeminiProvider::from_env()?);
//! let service = AgentService::new(GoalAgent::new(store.clone(), llm), store);
//!
//! let reply = service.invoke_for_user("u1").await?;
//! println!("{}", reply.message);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::significant_drop_tightening)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::future_not_send)]

pub mod agent;
pub mod ai;
pub mod relevance;
pub mod store;

pub use agent::{AgentError, AgentService, GoalAgent, Message, Role, WorkflowState};
pub use ai::{CompletionError, GeminiProvider, TextCompletion};
pub use relevance::RelevanceChecker;
pub use store::{
    ChatRecord, DocumentStore, GoalDocument, GoalsField, JsonFileStore, MemoryStore, NewChat,
    StoreError, UserType,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "goalmentor";
