//! Task/project relevance filtering.
//!
//! Asks the text-completion service a strict yes/no question about whether a
//! task belongs to a project, memoized per `(project_id, task_id)` pair.
//! Relevance filtering is best-effort: a failed provider call fails open
//! (the task is kept) rather than surfacing an error.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::ai::TextCompletion;

const RELEVANCE_SYSTEM: &str = "Answer with only 'yes' or 'no'.";

/// Memoizing relevance checker.
///
/// The cache lives as long as the checker and is never invalidated: a
/// cached answer is returned for a key even if the description changes
/// later. Concurrent misses on the same key may each issue a call and
/// overwrite each other's (identical) result; that race is benign.
pub struct RelevanceChecker {
    llm: Arc<dyn TextCompletion>,
    cache: RwLock<HashMap<(String, String), bool>>,
    max_entries: Option<usize>,
}

impl RelevanceChecker {
    /// Create a checker with an unbounded cache.
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self { llm, cache: RwLock::new(HashMap::new()), max_entries: None }
    }

    /// Bound the cache: once full, fresh results are still returned but no
    /// longer stored, so later calls re-evaluate.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Decide whether a task is relevant to a project.
    ///
    /// Projects without a description are permissive: the task is relevant,
    /// no call is made and nothing is cached. Otherwise the cached answer
    /// for `(project_id, task_id)` wins; on a miss, one completion call is
    /// made and its parsed result cached. A failed call returns `true`
    /// without caching, so a later call retries the evaluation.
    pub async fn is_relevant(
        &self,
        project_description: &str,
        task_title: &str,
        project_id: &str,
        task_id: &str,
    ) -> bool {
        if project_description.is_empty() {
            tracing::debug!(task_title, "no project description, relevant by default");
            return true;
        }

        let key = (project_id.to_string(), task_id.to_string());
        if let Some(&cached) = self.cache.read().get(&key) {
            tracing::debug!(project_id, task_id, relevant = cached, "relevance cache hit");
            return cached;
        }

        tracing::debug!(
            project_id,
            task_id,
            task_title,
            provider = self.llm.name(),
            "relevance cache miss, asking provider"
        );

        let prompt = format!(
            "Is the task titled '{task_title}' relevant to this project description: \
             '{project_description}'? Answer only 'yes' or 'no'."
        );

        match self.llm.complete(RELEVANCE_SYSTEM, &prompt).await {
            Ok(reply) => {
                let relevant = is_yes(&reply);
                tracing::debug!(project_id, task_id, relevant, "relevance decided");
                self.store(key, relevant);
                relevant
            }
            Err(e) => {
                // Fail open: never filter a task out because the provider
                // was unavailable. The key stays uncached so a later call
                // retries.
                tracing::warn!(project_id, task_id, error = %e, "relevance check failed, defaulting to relevant");
                true
            }
        }
    }

    /// Cached decision for a key, if any.
    pub fn cached(&self, project_id: &str, task_id: &str) -> Option<bool> {
        self.cache.read().get(&(project_id.to_string(), task_id.to_string())).copied()
    }

    /// Number of cached decisions.
    pub fn cache_len(&self) -> usize {
        self.cache.read().len()
    }

    fn store(&self, key: (String, String), relevant: bool) {
        let mut cache = self.cache.write();
        if let Some(max) = self.max_entries {
            if cache.len() >= max && !cache.contains_key(&key) {
                tracing::debug!(max, "relevance cache full, skipping store");
                return;
            }
        }
        cache.insert(key, relevant);
    }
}

/// A reply counts as relevant iff it starts with "yes" after trimming and
/// lower-casing; anything else (including "no" or malformed text) does not.
fn is_yes(reply: &str) -> bool {
    reply.trim().to_lowercase().starts_with("yes")
}
