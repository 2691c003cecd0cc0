//! Service wiring: pick a storage backend, build one handler per use case.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use tasklist_infra::{migrate, PostgresCommentRepository, PostgresTodoRepository};
use tasklist_todos::{
    CommentRepository, CreateCommentHandler, CreateTodoHandler, GetTodoHandler, InMemoryStore,
    ListCommentsHandler, ListTodosHandler, TodoRepository, UpdateTodoHandler,
};

/// All use-case handlers, wired over a shared pair of repositories.
pub struct AppServices {
    pub create_todo: CreateTodoHandler,
    pub update_todo: UpdateTodoHandler,
    pub list_todos: ListTodosHandler,
    pub get_todo: GetTodoHandler,
    pub create_comment: CreateCommentHandler,
    pub list_comments: ListCommentsHandler,
}

impl AppServices {
    pub fn new(todos: Arc<dyn TodoRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self {
            create_todo: CreateTodoHandler::new(todos.clone()),
            update_todo: UpdateTodoHandler::new(todos.clone()),
            list_todos: ListTodosHandler::new(todos.clone()),
            get_todo: GetTodoHandler::new(todos.clone()),
            create_comment: CreateCommentHandler::new(todos.clone(), comments.clone()),
            list_comments: ListCommentsHandler::new(todos, comments),
        }
    }

    /// In-memory backend (dev default and tests).
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(store.clone(), store)
    }
}

/// Build services from the environment.
///
/// `DATABASE_URL` set → Postgres (with schema migration on startup);
/// otherwise an in-memory store that forgets everything on restart.
pub async fn build_services() -> AppServices {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(8)
                .connect(&url)
                .await
                .expect("failed to connect to DATABASE_URL");
            migrate(&pool).await.expect("schema migration failed");
            tracing::info!("using postgres storage backend");
            AppServices::new(
                Arc::new(PostgresTodoRepository::new(pool.clone())),
                Arc::new(PostgresCommentRepository::new(pool)),
            )
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using volatile in-memory storage");
            AppServices::in_memory()
        }
    }
}
