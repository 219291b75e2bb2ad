use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::{SqlitePoolOptions, SqliteRow}, Pool, QueryBuilder, Row, Sqlite};
use uuid::Uuid;

use crate::domain::{
    error::TodoError,
    repository::TodoRepository,
    todo::{CreateTodo, ListQuery, Namespace, Priority, Todo, TodoId, DATE_FORMAT},
};

impl From<sqlx::Error> for TodoError {
    fn from(err: sqlx::Error) -> Self { TodoError::storage(err) }
}

const SELECT_TODOS: &str = "SELECT id, text, priority, end_date, done FROM todos WHERE user = ";

#[derive(Clone)]
pub struct SqliteTodoRepository {
    pool: Arc<Pool<Sqlite>>,
}

impl SqliteTodoRepository {
    pub async fn connect(database_url: &str) -> Result<Self, TodoError> {
        // One command per process; a single connection also keeps `sqlite::memory:` a single database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;
        tracing::info!(database_url, "connected to store");
        Ok(Self { pool: Arc::new(pool) })
    }
}

#[async_trait]
impl TodoRepository for SqliteTodoRepository {
    async fn init(&self) -> Result<(), TodoError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                user TEXT NOT NULL,
                text TEXT NOT NULL,
                priority TEXT NOT NULL,
                end_date TEXT,
                done INTEGER NOT NULL DEFAULT 0
            )",
        )
        .execute(&*self.pool)
        .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS todos_user_priority ON todos (user, priority)")
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    async fn insert(&self, ns: &Namespace, input: CreateTodo) -> Result<Todo, TodoError> {
        let id = TodoId::new();
        sqlx::query(
            "INSERT INTO todos (id, user, text, priority, end_date, done)
             VALUES (?1, ?2, ?3, ?4, ?5, 0)",
        )
        .bind(id.0.to_string())
        .bind(ns.as_str())
        .bind(&input.text)
        .bind(input.priority.as_str())
        .bind(input.end_date.map(|d| d.format(DATE_FORMAT).to_string()))
        .execute(&*self.pool)
        .await?;
        Ok(Todo { id, text: input.text, priority: input.priority, end_date: input.end_date, done: false })
    }

    async fn find(&self, ns: &Namespace, query: ListQuery) -> Result<Vec<Todo>, TodoError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_TODOS);
        qb.push_bind(ns.as_str());
        if let Some(priority) = query.priority {
            qb.push(" AND priority = ").push_bind(priority.as_str());
        }
        if let Some(done) = query.done {
            qb.push(" AND done = ").push_bind(done);
        }
        // ISO dates sort lexically; rows without a date go last.
        qb.push(if query.sort { " ORDER BY end_date IS NULL, end_date ASC, rowid ASC" } else { " ORDER BY rowid ASC" });

        let rows = qb.build().fetch_all(&*self.pool).await?;
        rows.iter().map(row_to_todo).collect()
    }

    async fn set_done(&self, ns: &Namespace, id: TodoId) -> Result<u64, TodoError> {
        let result = sqlx::query("UPDATE todos SET done = 1 WHERE user = ?1 AND id = ?2")
            .bind(ns.as_str())
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, ns: &Namespace, id: TodoId) -> Result<u64, TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE user = ?1 AND id = ?2")
            .bind(ns.as_str())
            .bind(id.0.to_string())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn drop_namespace(&self, ns: &Namespace) -> Result<u64, TodoError> {
        let result = sqlx::query("DELETE FROM todos WHERE user = ?1")
            .bind(ns.as_str())
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_todo(row: &SqliteRow) -> Result<Todo, TodoError> {
    let id_str: String = row.try_get("id")?;
    let text: String = row.try_get("text")?;
    let priority_str: String = row.try_get("priority")?;
    let end_date_str: Option<String> = row.try_get("end_date")?;
    let done: bool = row.try_get("done")?;

    let id = Uuid::parse_str(&id_str).map_err(decode_error)?;
    let priority: Priority = priority_str.parse().map_err(decode_error)?;
    let end_date = end_date_str
        .map(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT))
        .transpose()
        .map_err(decode_error)?;

    Ok(Todo { id: TodoId(id), text, priority, end_date, done })
}

fn decode_error<E: std::error::Error + Send + Sync + 'static>(err: E) -> TodoError {
    sqlx::Error::Decode(Box::new(err)).into()
}
