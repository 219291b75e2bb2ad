use crate::domain::error::TodoError;
use crate::domain::repository::TodoRepository;
use crate::domain::todo::{CreateTodo, ListQuery, Namespace, NewTodo, Todo, TodoId};
use async_trait::async_trait;

/// The four todo operations, each scoped to one user.
///
/// Input is validated before the repository is called, so a rejected call
/// never reaches the store.
#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    async fn add(&self, user: &str, input: NewTodo) -> Result<TodoId, TodoError>;
    async fn delete(&self, user: &str, id: &str) -> Result<u64, TodoError>;
    async fn mark_done(&self, user: &str, id: &str) -> Result<u64, TodoError>;
    async fn list(&self, user: &str, query: ListQuery) -> Result<Vec<Todo>, TodoError>;
    async fn drop_namespace(&self, user: &str) -> Result<u64, TodoError>;
}

#[derive(Clone)]
pub struct TodoStoreImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoStoreImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    pub fn repository(&self) -> &R { &self.repo }
}

#[async_trait]
impl<R: TodoRepository> TodoStore for TodoStoreImpl<R> {
    async fn add(&self, user: &str, input: NewTodo) -> Result<TodoId, TodoError> {
        let ns = Namespace::parse(user)?;
        let input = CreateTodo::try_from(input)?;
        let todo = self.repo.insert(&ns, input).await?;
        tracing::debug!(namespace = %ns, id = %todo.id, priority = %todo.priority, "todo added");
        Ok(todo.id)
    }

    async fn delete(&self, user: &str, id: &str) -> Result<u64, TodoError> {
        let ns = Namespace::parse(user)?;
        let id: TodoId = id.parse()?;
        let removed = self.repo.delete(&ns, id).await?;
        tracing::debug!(namespace = %ns, %id, removed, "todo delete");
        Ok(removed)
    }

    async fn mark_done(&self, user: &str, id: &str) -> Result<u64, TodoError> {
        let ns = Namespace::parse(user)?;
        let id: TodoId = id.parse()?;
        let modified = self.repo.set_done(&ns, id).await?;
        tracing::debug!(namespace = %ns, %id, modified, "todo done");
        Ok(modified)
    }

    async fn list(&self, user: &str, query: ListQuery) -> Result<Vec<Todo>, TodoError> {
        let ns = Namespace::parse(user)?;
        let todos = self.repo.find(&ns, query).await?;
        tracing::debug!(namespace = %ns, ?query, count = todos.len(), "todos listed");
        Ok(todos)
    }

    async fn drop_namespace(&self, user: &str) -> Result<u64, TodoError> {
        let ns = Namespace::parse(user)?;
        let removed = self.repo.drop_namespace(&ns).await?;
        tracing::debug!(namespace = %ns, removed, "namespace dropped");
        Ok(removed)
    }
}
