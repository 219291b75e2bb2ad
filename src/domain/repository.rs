use async_trait::async_trait;
use super::error::TodoError;
use super::todo::{CreateTodo, ListQuery, Namespace, Todo, TodoId};

/// Store handle. Every call is confined to one namespace.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> Result<(), TodoError>;
    async fn insert(&self, ns: &Namespace, input: CreateTodo) -> Result<Todo, TodoError>;
    async fn find(&self, ns: &Namespace, query: ListQuery) -> Result<Vec<Todo>, TodoError>;
    /// Number of records matched (0 or 1).
    async fn set_done(&self, ns: &Namespace, id: TodoId) -> Result<u64, TodoError>;
    /// Number of records removed (0 or 1).
    async fn delete(&self, ns: &Namespace, id: TodoId) -> Result<u64, TodoError>;
    async fn drop_namespace(&self, ns: &Namespace) -> Result<u64, TodoError>;
    /// Releases the underlying connections.
    async fn close(&self) {}
}
