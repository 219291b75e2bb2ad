pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::{
    application::todo_store::TodoStoreImpl,
    domain::{error::TodoError, repository::TodoRepository, todo::Priority},
    presentation::{Report, StatusLine},
};

#[derive(Debug, Parser)]
#[command(name = "todo", version, about = "Keep track of your todos", propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a todo
    Add {
        user: String,
        text: String,
        #[arg(short, long, value_enum, default_value_t = Priority::Low)]
        priority: Priority,
        /// Deadline, YYYY-MM-DD
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Delete a todo by id
    Delete { user: String, id: String },
    /// Mark a todo as done
    Done { user: String, id: String },
    /// List todos
    List {
        user: String,
        /// Sort by end date, todos without one last
        #[arg(long)]
        sort: bool,
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,
        /// Only completed todos
        #[arg(long, conflicts_with = "pending")]
        done: bool,
        /// Only todos still open
        #[arg(long)]
        pending: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success,
    Failure,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        match exit {
            Exit::Success => ExitCode::SUCCESS,
            Exit::Failure => ExitCode::FAILURE,
        }
    }
}

/// Initialises the store, runs one command and releases the store again.
pub async fn run<R: TodoRepository>(repo: R, command: Command) -> Result<Report, TodoError> {
    let store = TodoStoreImpl::new(repo);
    let result = match store.repository().init().await {
        Ok(()) => commands::execute(&store, command).await,
        Err(e) => Err(e),
    };
    store.repository().close().await;
    result.map(|outcome| outcome.report())
}

/// A zero count ("not found") is still a successful run; every error becomes one status line.
pub fn finish(result: anyhow::Result<Report>) -> (Report, Exit) {
    match result {
        Ok(report) => (report, Exit::Success),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            (Report::Status(StatusLine::from_error(&err)), Exit::Failure)
        }
    }
}
