use crate::{
    application::todo_store::TodoStore,
    domain::{
        error::TodoError,
        todo::{ListQuery, NewTodo, Todo, TodoId},
    },
    presentation::{Report, StatusLine, TodoTable},
};

use super::Command;

/// Result of one command, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(TodoId),
    Deleted { id: String, count: u64 },
    MarkedDone { id: String, count: u64 },
    Listed(Vec<Todo>),
}

impl Outcome {
    pub fn report(&self) -> Report {
        match self {
            Outcome::Added(id) => Report::Status(StatusLine::success("Todo added successfully").with_id(id)),
            Outcome::Deleted { id, count: 0 } | Outcome::MarkedDone { id, count: 0 } => {
                Report::Status(StatusLine::warning("Todo not found").with_id(id))
            }
            Outcome::Deleted { id, .. } => Report::Status(StatusLine::success("Todo deleted successfully").with_id(id)),
            Outcome::MarkedDone { id, .. } => {
                Report::Status(StatusLine::success("Todo marked as done successfully").with_id(id))
            }
            Outcome::Listed(todos) => Report::Table(TodoTable::from_todos(todos)),
        }
    }
}

pub async fn execute<S: TodoStore>(store: &S, command: Command) -> Result<Outcome, TodoError> {
    match command {
        Command::Add { user, text, priority, end_date } => {
            let id = store.add(&user, NewTodo { text, priority, end_date }).await?;
            Ok(Outcome::Added(id))
        }
        Command::Delete { user, id } => {
            let count = store.delete(&user, &id).await?;
            Ok(Outcome::Deleted { id, count })
        }
        Command::Done { user, id } => {
            let count = store.mark_done(&user, &id).await?;
            Ok(Outcome::MarkedDone { id, count })
        }
        Command::List { user, sort, priority, done, pending } => {
            let done = match (done, pending) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let todos = store.list(&user, ListQuery { sort, priority, done }).await?;
            Ok(Outcome::Listed(todos))
        }
    }
}
