//! End-to-end tests for the goal-summary workflow and its boundary.

mod common;

use std::sync::Arc;

use serde_json::json;

use common::{FailingStore, MockCompletion};
use goalmentor::{AgentError, AgentService, GoalAgent, MemoryStore, UserType};

fn service(store: Arc<MemoryStore>, llm: Arc<MockCompletion>) -> AgentService {
    AgentService::new(GoalAgent::new(store.clone(), llm), store)
}

#[tokio::test]
async fn test_single_goal_summary_persisted() {
    // Scenario A: a single string-shaped goal flows through the planner.
    let store = Arc::new(MemoryStore::new());
    store.set_goals_value("u1", json!("Learn Go"));
    let llm = MockCompletion::replying("Go for it! You're on your way.");
    let service = service(store.clone(), llm.clone());

    let record = service.invoke_for_user("u1").await.unwrap();

    assert_eq!(llm.calls(), 1);
    assert!(llm.last_prompt().unwrap().contains("Learn Go"));
    assert_eq!(record.user_type, UserType::Agent);
    assert_eq!(record.message, "Go for it! You're on your way.");
    assert_eq!(store.chat_count(), 1);
}

#[tokio::test]
async fn test_no_goals_document_gets_fallback() {
    // Scenario B: no stored document routes to the fixed reply, zero calls.
    let store = Arc::new(MemoryStore::new());
    let llm = MockCompletion::replying("unused");
    let service = service(store.clone(), llm.clone());

    let record = service.invoke_for_user("u2").await.unwrap();

    assert_eq!(llm.calls(), 0);
    assert!(record.message.contains("haven't set any goals yet"));
    assert_eq!(record.user_type, UserType::Agent);
}

#[tokio::test]
async fn test_multiple_goals_numbered_in_prompt() {
    let store = Arc::new(MemoryStore::new());
    store.set_goals_value("u1", json!(["Learn Rust", "Ship a crate", "Write docs"]));
    let llm = MockCompletion::replying("Three great goals!");
    let service = service(store.clone(), llm.clone());

    service.invoke_for_user("u1").await.unwrap();

    assert_eq!(llm.calls(), 1);
    let prompt = llm.last_prompt().unwrap();
    assert!(prompt.contains("1. Learn Rust\n2. Ship a crate\n3. Write docs"));
}

#[tokio::test]
async fn test_whitespace_goal_routes_to_fallback() {
    let store = Arc::new(MemoryStore::new());
    store.set_goals_value("u1", json!("   "));
    let llm = MockCompletion::replying("unused");
    let service = service(store.clone(), llm.clone());

    let record = service.invoke_for_user("u1").await.unwrap();

    assert_eq!(llm.calls(), 0);
    assert!(record.message.contains("haven't set any goals yet"));
}

#[tokio::test]
async fn test_malformed_goals_route_to_fallback() {
    for shape in [json!(42), json!({"oops": true}), json!(null), json!([])] {
        let store = Arc::new(MemoryStore::new());
        store.set_goals_value("u1", shape);
        let llm = MockCompletion::replying("unused");
        let service = service(store.clone(), llm.clone());

        let record = service.invoke_for_user("u1").await.unwrap();
        assert_eq!(llm.calls(), 0);
        assert!(record.message.contains("haven't set any goals yet"));
    }
}

#[tokio::test]
async fn test_completion_failure_persists_nothing() {
    let store = Arc::new(MemoryStore::new());
    store.set_goals_value("u1", json!("Learn Go"));
    let llm = MockCompletion::failing();
    let service = service(store.clone(), llm.clone());

    let result = service.invoke_for_user("u1").await;

    assert!(matches!(result, Err(AgentError::Completion(_))));
    assert_eq!(store.chat_count(), 0);
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let llm = MockCompletion::replying("unused");
    let service = AgentService::new(
        GoalAgent::new(Arc::new(FailingStore), llm.clone()),
        Arc::new(FailingStore),
    );

    let result = service.invoke_for_user("u1").await;

    assert!(matches!(result, Err(AgentError::Store(_))));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn test_history_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    store.set_goals_value("u1", json!("Learn Go"));
    let llm = MockCompletion::replying("Nice goal!");
    let service = service(store.clone(), llm.clone());

    service.invoke_for_user("u1").await.unwrap();

    let first = service.history("u1").await.unwrap();
    let second = service.history("u1").await.unwrap();

    assert_eq!(first.len(), 1);
    let ids = |records: &[goalmentor::ChatRecord]| {
        records.iter().map(|r| r.id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
}

#[tokio::test]
async fn test_history_ordered_oldest_first() {
    let store = Arc::new(MemoryStore::new());
    store.set_goals_value("u1", json!("Learn Go"));
    let llm = MockCompletion::replying("Keep going!");
    let service = service(store.clone(), llm.clone());

    service.invoke_for_user("u1").await.unwrap();
    service.invoke_for_user("u1").await.unwrap();

    let history = service.history("u1").await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].timestamp <= history[1].timestamp);
}
