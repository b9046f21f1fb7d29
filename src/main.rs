//! Goalmentor - goal-coaching agent service.
//!
//! Thin CLI over the three boundary operations: invoke the agent for a
//! user, read a user's chat history, and check task/project relevance.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use goalmentor::{
    AgentService, DocumentStore, GeminiProvider, GoalAgent, JsonFileStore, RelevanceChecker,
};

/// Goal-coaching agent service
#[derive(Parser)]
#[command(name = "goalmentor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the JSON store file
    #[arg(long, global = true, env = "GOALMENTOR_DATA")]
    data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke the agent for a user and print the persisted reply
    Invoke {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Print a user's chat history, oldest first
    History {
        /// User identifier
        #[arg(short, long)]
        user: String,
    },

    /// Check whether a task is relevant to a project
    Relevance {
        /// Project identifier (cache key)
        #[arg(long)]
        project_id: String,

        /// Task identifier (cache key)
        #[arg(long)]
        task_id: String,

        /// Task title
        #[arg(long)]
        task_title: String,

        /// Project description; tasks are relevant by default without one
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("goalmentor=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("goalmentor=warn"))
    };
    tracing_subscriber::registry().with(fmt::layer().with_target(false)).with(filter).init();

    match cli.command {
        Commands::Invoke { user } => {
            let store = open_store(cli.data)?;
            let llm = Arc::new(GeminiProvider::from_env()?);
            let service = AgentService::new(GoalAgent::new(store.clone(), llm), store);

            let record = service.invoke_for_user(&user).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::History { user } => {
            // Pure store read; no provider (or API key) needed.
            let store = open_store(cli.data)?;
            let history = store.chats_for_user(&user).await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Commands::Relevance { project_id, task_id, task_title, description } => {
            let llm = Arc::new(GeminiProvider::from_env()?);
            let checker = RelevanceChecker::new(llm);

            let relevant =
                checker.is_relevant(&description, &task_title, &project_id, &task_id).await;
            println!("{relevant}");
        }
    }

    Ok(())
}

/// Open the JSON store at the given path, defaulting to the local data dir.
fn open_store(path: Option<PathBuf>) -> Result<Arc<JsonFileStore>> {
    let path = match path {
        Some(path) => path,
        None => dirs::data_local_dir()
            .context("could not determine local data directory")?
            .join("goalmentor")
            .join("store.json"),
    };

    let store = JsonFileStore::open(path.clone())
        .with_context(|| format!("failed to open store at {}", path.display()))?;
    Ok(Arc::new(store))
}
