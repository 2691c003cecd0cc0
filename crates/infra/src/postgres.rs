//! Postgres repository implementations over `sqlx`.
//!
//! Row-for-row mapping into the entities' `hydrate` constructors; every
//! statement is a single round-trip (`save` is one upsert, no batching).
//! The cascade from a todo to its comments is carried by the schema's
//! `ON DELETE CASCADE` foreign key.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use tasklist_core::{CommentId, TodoId};
use tasklist_todos::{
    Comment, CommentRepository, StoreError, Todo, TodoRepository, TodoStatus,
};

const SCHEMA: &str = include_str!("../migrations/0001_init.sql");

/// Apply the embedded schema. Idempotent (`CREATE TABLE IF NOT EXISTS`).
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(store_err)?;
    tracing::info!("schema migration applied");
    Ok(())
}

fn store_err(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn status_from_row(s: &str) -> Result<TodoStatus, StoreError> {
    // Rows were validated on the way in; anything else is corruption.
    TodoStatus::parse(s).map_err(|_| StoreError::Backend(format!("unknown status in row: {s}")))
}

fn todo_from_row(row: &sqlx::postgres::PgRow) -> Result<Todo, StoreError> {
    let id: Uuid = row.try_get("id").map_err(store_err)?;
    let title: String = row.try_get("title").map_err(store_err)?;
    let status: String = row.try_get("status").map_err(store_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(store_err)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(store_err)?;
    Ok(Todo::hydrate(
        TodoId::from_uuid(id),
        title,
        status_from_row(&status)?,
        created_at,
        updated_at,
    ))
}

fn comment_from_row(row: &sqlx::postgres::PgRow) -> Result<Comment, StoreError> {
    let id: Uuid = row.try_get("id").map_err(store_err)?;
    let todo_id: Uuid = row.try_get("todo_id").map_err(store_err)?;
    let message: String = row.try_get("message").map_err(store_err)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(store_err)?;
    Ok(Comment::hydrate(
        CommentId::from_uuid(id),
        TodoId::from_uuid(todo_id),
        message,
        created_at,
    ))
}

/// Postgres-backed todo repository.
#[derive(Debug, Clone)]
pub struct PostgresTodoRepository {
    pool: PgPool,
}

impl PostgresTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn find(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query(
            "SELECT id, title, status, created_at, updated_at FROM todos WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;

        row.as_ref().map(todo_from_row).transpose()
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, title, status, created_at, updated_at FROM todos \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.iter().map(todo_from_row).collect()
    }

    async fn save(&self, todo: &Todo) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO todos (id, title, status, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (id) DO UPDATE SET \
               title = EXCLUDED.title, \
               status = EXCLUDED.status, \
               updated_at = EXCLUDED.updated_at",
        )
        .bind(todo.id_typed().as_uuid())
        .bind(todo.title())
        .bind(todo.status().as_str())
        .bind(todo.created_at())
        .bind(todo.updated_at())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        // Comments go with the todo via the FK cascade.
        sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }
}

/// Postgres-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO comments (id, todo_id, message, created_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(comment.id_typed().as_uuid())
        .bind(comment.todo_id().as_uuid())
        .bind(comment.message())
        .bind(comment.created_at())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    async fn list_by_todo(&self, todo_id: TodoId) -> Result<Vec<Comment>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, todo_id, message, created_at FROM comments \
             WHERE todo_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(todo_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;

        rows.iter().map(comment_from_row).collect()
    }
}
