#[cfg(test)]
mod tests {
    use super::super::todo_store::{TodoStore, TodoStoreImpl};
    use crate::domain::{
        error::{TodoError, ValidationError},
        repository::TodoRepository,
        todo::{cmp_end_date, CreateTodo, ListQuery, Namespace, NewTodo, Priority, Todo, TodoId},
    };
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    };

    #[derive(Clone, Default)]
    struct InMemoryRepo {
        items: Arc<Mutex<Vec<(Namespace, Todo)>>>,
        calls: Arc<AtomicUsize>,
    }

    impl InMemoryRepo {
        fn touch(&self) { self.calls.fetch_add(1, Ordering::SeqCst); }
        fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
    }

    #[async_trait]
    impl TodoRepository for InMemoryRepo {
        async fn init(&self) -> Result<(), TodoError> { Ok(()) }
        async fn insert(&self, ns: &Namespace, input: CreateTodo) -> Result<Todo, TodoError> {
            self.touch();
            let todo = Todo { id: TodoId::new(), text: input.text, priority: input.priority, end_date: input.end_date, done: false };
            self.items.lock().unwrap().push((ns.clone(), todo.clone()));
            Ok(todo)
        }
        async fn find(&self, ns: &Namespace, query: ListQuery) -> Result<Vec<Todo>, TodoError> {
            self.touch();
            let mut todos: Vec<Todo> = self.items.lock().unwrap().iter()
                .filter(|(owner, t)| owner == ns && query.matches(t))
                .map(|(_, t)| t.clone())
                .collect();
            if query.sort { todos.sort_by(cmp_end_date); }
            Ok(todos)
        }
        async fn set_done(&self, ns: &Namespace, id: TodoId) -> Result<u64, TodoError> {
            self.touch();
            let mut items = self.items.lock().unwrap();
            let Some((_, todo)) = items.iter_mut().find(|(owner, t)| owner == ns && t.id == id) else { return Ok(0) };
            todo.done = true;
            Ok(1)
        }
        async fn delete(&self, ns: &Namespace, id: TodoId) -> Result<u64, TodoError> {
            self.touch();
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|(owner, t)| !(owner == ns && t.id == id));
            Ok((before - items.len()) as u64)
        }
        async fn drop_namespace(&self, ns: &Namespace) -> Result<u64, TodoError> {
            self.touch();
            let mut items = self.items.lock().unwrap();
            let before = items.len();
            items.retain(|(owner, _)| owner != ns);
            Ok((before - items.len()) as u64)
        }
    }

    #[derive(Clone, Default)]
    struct OfflineRepo;

    #[async_trait]
    impl TodoRepository for OfflineRepo {
        async fn init(&self) -> Result<(), TodoError> { Err(offline()) }
        async fn insert(&self, _: &Namespace, _: CreateTodo) -> Result<Todo, TodoError> { Err(offline()) }
        async fn find(&self, _: &Namespace, _: ListQuery) -> Result<Vec<Todo>, TodoError> { Err(offline()) }
        async fn set_done(&self, _: &Namespace, _: TodoId) -> Result<u64, TodoError> { Err(offline()) }
        async fn delete(&self, _: &Namespace, _: TodoId) -> Result<u64, TodoError> { Err(offline()) }
        async fn drop_namespace(&self, _: &Namespace) -> Result<u64, TodoError> { Err(offline()) }
    }

    fn offline() -> TodoError {
        TodoError::storage(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"))
    }

    fn new_todo(text: &str, priority: Priority, end_date: Option<&str>) -> NewTodo {
        NewTodo { text: text.into(), priority, end_date: end_date.map(Into::into) }
    }

    #[tokio::test]
    async fn unit_add_and_list() {
        let service = TodoStoreImpl::new(InMemoryRepo::default());
        let id = service.add("bob", new_todo("X", Priority::High, Some("2022-12-31"))).await.unwrap();
        let todos = service.list("bob", ListQuery::default()).await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, id);
        assert_eq!(todos[0].text, "X");
        assert_eq!(todos[0].priority, Priority::High);
        assert_eq!(todos[0].end_date.unwrap().to_string(), "2022-12-31");
        assert!(!todos[0].done);
    }

    #[tokio::test]
    async fn unit_validation_happens_before_storage() {
        let repo = InMemoryRepo::default();
        let service = TodoStoreImpl::new(repo.clone());

        let err = service.add("bob", new_todo("X", Priority::Low, Some("2022-12-32"))).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::InvalidDate(_))));
        let err = service.add("bob", new_todo("   ", Priority::Low, None)).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::EmptyText)));
        let err = service.add("", new_todo("X", Priority::Low, None)).await.unwrap_err();
        assert!(matches!(err, TodoError::Validation(ValidationError::EmptyUser)));
        let err = service.delete("bob", "123").await.unwrap_err();
        assert!(matches!(err, TodoError::InvalidIdentifier(_)));
        let err = service.mark_done("bob", "zzz").await.unwrap_err();
        assert!(matches!(err, TodoError::InvalidIdentifier(_)));

        assert_eq!(repo.calls(), 0);
    }

    #[tokio::test]
    async fn unit_not_found_is_a_zero_count() {
        let service = TodoStoreImpl::new(InMemoryRepo::default());
        let unknown = TodoId::new().to_string();
        assert_eq!(service.delete("bob", &unknown).await.unwrap(), 0);
        assert_eq!(service.mark_done("bob", &unknown).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn unit_mark_done_is_idempotent() {
        let service = TodoStoreImpl::new(InMemoryRepo::default());
        let id = service.add("bob", new_todo("X", Priority::Low, None)).await.unwrap().to_string();
        assert_eq!(service.mark_done("bob", &id).await.unwrap(), 1);
        assert_eq!(service.mark_done("bob", &id).await.unwrap(), 1);
        assert!(service.list("bob", ListQuery::default()).await.unwrap()[0].done);
    }

    #[tokio::test]
    async fn unit_user_names_are_case_insensitive() {
        let service = TodoStoreImpl::new(InMemoryRepo::default());
        service.add("Alice", new_todo("X", Priority::Low, None)).await.unwrap();
        assert_eq!(service.list("alice", ListQuery::default()).await.unwrap().len(), 1);
        assert_eq!(service.list("bob", ListQuery::default()).await.unwrap().len(), 0);
        assert_eq!(service.drop_namespace("ALICE").await.unwrap(), 1);
        assert!(service.list("alice", ListQuery::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unit_storage_failures_surface() {
        let service = TodoStoreImpl::new(OfflineRepo);
        let err = service.list("bob", ListQuery::default()).await.unwrap_err();
        assert!(matches!(err, TodoError::StorageUnavailable(_)));
        assert!(err.to_string().contains("connection refused"));
    }
}
