//! The goal-summary workflow engine.
//!
//! Three steps, one decision: a supervisor step loads and normalizes the
//! user's goals, a routing decision picks a terminal branch, and exactly one
//! of `task_planner` (LLM summary) or `no_goals` (fixed reply) runs.
//! Modeled as a plain sequential function with an explicit route enum
//! rather than a graph abstraction; the graph carried no behavior beyond
//! these three states.

use std::sync::Arc;

use crate::ai::TextCompletion;
use crate::store::DocumentStore;

use super::state::{Message, WorkflowState};
use super::AgentError;

const SYSTEM_PROMPT: &str = "You are a helpful task planning assistant.\n\
Create a brief, encouraging summary of the user's goals (2-3 sentences max).\n\
Focus on what they want to achieve and provide motivational context.";

const NO_GOALS_MESSAGE: &str = "I noticed you haven't set any goals yet. \
To get started, please set your learning goals first. \
You can do this by using the goals endpoint to define what you want to achieve!";

/// Routing decision taken after the supervisor step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    TaskPlanner,
    NoGoals,
}

/// The goal-summary workflow engine.
///
/// Performs exactly one store read and at most one completion call per
/// invocation. Store and provider failures propagate; the caller must not
/// persist anything for a failed invocation.
pub struct GoalAgent {
    store: Arc<dyn DocumentStore>,
    llm: Arc<dyn TextCompletion>,
}

impl GoalAgent {
    /// Create an engine over the given collaborators.
    pub fn new(store: Arc<dyn DocumentStore>, llm: Arc<dyn TextCompletion>) -> Self {
        Self { store, llm }
    }

    /// Run the workflow to completion for one user.
    ///
    /// Returns the final state with `response_text` set and exactly one
    /// agent message appended by whichever terminal branch ran.
    pub async fn invoke(&self, user_id: &str) -> Result<WorkflowState, AgentError> {
        let mut state = WorkflowState::new(user_id);

        self.supervisor(&mut state).await?;

        match route(&state) {
            Route::TaskPlanner => self.task_planner(&mut state).await?,
            Route::NoGoals => no_goals(&mut state),
        }

        Ok(state)
    }

    /// Supervisor step: load the user's goals and normalize them.
    async fn supervisor(&self, state: &mut WorkflowState) -> Result<(), AgentError> {
        let doc = self.store.find_goals(&state.user_id).await?;
        state.goals = doc.map(|d| d.goals.normalize()).unwrap_or_default();

        tracing::debug!(
            user_id = %state.user_id,
            goal_count = state.goals.len(),
            "analyzed user state"
        );
        Ok(())
    }

    /// Task-planner branch: summarize the goals with one completion call.
    async fn task_planner(&self, state: &mut WorkflowState) -> Result<(), AgentError> {
        let goal_text = enumerate_goals(&state.goals);
        let prompt = format!(
            "The user has set the following goal(s):\n\n{goal_text}\n\n\
             Please provide a brief summary of this goal and encourage the user."
        );

        tracing::debug!(
            provider = self.llm.name(),
            goal_count = state.goals.len(),
            "summarizing goals"
        );

        let summary = self.llm.complete(SYSTEM_PROMPT, &prompt).await.map_err(|e| {
            tracing::error!(provider = self.llm.name(), error = %e, "completion call failed");
            e
        })?;

        state.messages.push(Message::agent(summary.clone()));
        state.response_text = summary;
        Ok(())
    }
}

/// Routing decision: no-goals branch iff the normalized sequence is empty.
fn route(state: &WorkflowState) -> Route {
    if state.goals.is_empty() {
        tracing::debug!(user_id = %state.user_id, "no goals found, routing to no_goals");
        Route::NoGoals
    } else {
        tracing::debug!(
            user_id = %state.user_id,
            goal_count = state.goals.len(),
            "routing to task_planner"
        );
        Route::TaskPlanner
    }
}

/// No-goals branch: fixed reply, no external call.
fn no_goals(state: &mut WorkflowState) {
    state.messages.push(Message::agent(NO_GOALS_MESSAGE));
    state.response_text = NO_GOALS_MESSAGE.to_string();
}

/// Render goals for the prompt: a single goal verbatim, multiple goals as a
/// 1-indexed numbered list in their original order.
fn enumerate_goals(goals: &[String]) -> String {
    if goals.len() == 1 {
        return goals[0].clone();
    }
    goals
        .iter()
        .enumerate()
        .map(|(i, goal)| format!("{}. {}", i + 1, goal))
        .collect::<Vec<_>>()
        .join("\n")
}
