//! Command handlers: one stateless orchestration per mutating use case.
//!
//! Contract shape: load the aggregate(s) by id, fail `NotFound` if missing,
//! apply the business-rule check if there is one, fail `Conflict` if
//! violated, construct/mutate, persist, return.

use std::sync::Arc;

use thiserror::Error;

use tasklist_core::{DomainError, TodoId};

use crate::comment::{Comment, COMMENT_FORBIDDEN_ON_DONE};
use crate::repository::{CommentRepository, StoreError, TodoRepository};
use crate::todo::Todo;

/// Handler-level error: deterministic domain failures plus backend failures.
///
/// The HTTP boundary maps `Domain` variants to their contract status codes
/// and `Store` to a generic server error.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type HandlerResult<T> = Result<T, HandlerError>;

/// Command: create a todo.
#[derive(Debug, Clone)]
pub struct CreateTodo {
    pub title: String,
}

pub struct CreateTodoHandler {
    todos: Arc<dyn TodoRepository>,
}

impl CreateTodoHandler {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub async fn handle(&self, command: CreateTodo) -> HandlerResult<Todo> {
        let todo = Todo::new(&command.title)?;
        self.todos.save(&todo).await?;
        Ok(todo)
    }
}

/// Command: partially update a todo (title and/or status).
#[derive(Debug, Clone)]
pub struct UpdateTodo {
    pub id: TodoId,
    pub title: Option<String>,
    pub status: Option<String>,
}

pub struct UpdateTodoHandler {
    todos: Arc<dyn TodoRepository>,
}

impl UpdateTodoHandler {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub async fn handle(&self, command: UpdateTodo) -> HandlerResult<Todo> {
        let mut todo = self
            .todos
            .find(command.id)
            .await?
            .ok_or(DomainError::NotFound)?;
        todo.rename(command.title.as_deref())?;
        todo.change_status(command.status.as_deref())?;
        self.todos.save(&todo).await?;
        Ok(todo)
    }
}

/// Command: add a comment to a todo.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub todo_id: TodoId,
    pub message: String,
}

pub struct CreateCommentHandler {
    todos: Arc<dyn TodoRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl CreateCommentHandler {
    pub fn new(todos: Arc<dyn TodoRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { todos, comments }
    }

    /// Check order is part of the contract: existence, then the done rule,
    /// then message validation. A request against a missing todo is NotFound
    /// even when the message is also invalid.
    pub async fn handle(&self, command: CreateComment) -> HandlerResult<Comment> {
        let todo = self
            .todos
            .find(command.todo_id)
            .await?
            .ok_or(DomainError::NotFound)?;
        if !todo.can_accept_comments() {
            return Err(DomainError::conflict(
                COMMENT_FORBIDDEN_ON_DONE,
                "Cannot add a comment to a completed Todo.",
            )
            .into());
        }
        let comment = Comment::new(&todo, &command.message)?;
        self.comments.save(&comment).await?;
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;
    use crate::todo::TodoStatus;

    fn store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::new())
    }

    #[tokio::test]
    async fn create_todo_persists_and_returns_the_aggregate() {
        let store = store();
        let handler = CreateTodoHandler::new(store.clone());

        let todo = handler
            .handle(CreateTodo {
                title: "Buy milk".into(),
            })
            .await
            .unwrap();

        assert_eq!(todo.status(), TodoStatus::Open);
        let persisted = store.find(todo.id_typed()).await.unwrap();
        assert_eq!(persisted, Some(todo));
    }

    #[tokio::test]
    async fn create_todo_rejects_invalid_title_and_persists_nothing() {
        let store = store();
        let handler = CreateTodoHandler::new(store.clone());

        let err = handler
            .handle(CreateTodo { title: "  ".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Domain(DomainError::Validation(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_todo_applies_both_fields() {
        let store = store();
        let created = CreateTodoHandler::new(store.clone())
            .handle(CreateTodo {
                title: "Task".into(),
            })
            .await
            .unwrap();

        let handler = UpdateTodoHandler::new(store.clone());
        let updated = handler
            .handle(UpdateTodo {
                id: created.id_typed(),
                title: Some("Task updated".into()),
                status: Some("done".into()),
            })
            .await
            .unwrap();

        assert_eq!(updated.title(), "Task updated");
        assert_eq!(updated.status(), TodoStatus::Done);
        assert!(updated.updated_at() >= created.updated_at());
        let persisted = store.find(created.id_typed()).await.unwrap().unwrap();
        assert_eq!(persisted, updated);
    }

    #[tokio::test]
    async fn update_todo_with_no_fields_changes_nothing() {
        let store = store();
        let created = CreateTodoHandler::new(store.clone())
            .handle(CreateTodo {
                title: "Task".into(),
            })
            .await
            .unwrap();

        let updated = UpdateTodoHandler::new(store.clone())
            .handle(UpdateTodo {
                id: created.id_typed(),
                title: None,
                status: None,
            })
            .await
            .unwrap();

        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn update_unknown_todo_is_not_found() {
        let handler = UpdateTodoHandler::new(store());
        let err = handler
            .handle(UpdateTodo {
                id: TodoId::new(),
                title: Some("X".into()),
                status: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Domain(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn create_comment_on_open_todo_succeeds() {
        let store = store();
        let todo = CreateTodoHandler::new(store.clone())
            .handle(CreateTodo {
                title: "Task".into(),
            })
            .await
            .unwrap();

        let handler = CreateCommentHandler::new(store.clone(), store.clone());
        let comment = handler
            .handle(CreateComment {
                todo_id: todo.id_typed(),
                message: "First!".into(),
            })
            .await
            .unwrap();

        assert_eq!(comment.todo_id(), todo.id_typed());
        assert_eq!(
            store.list_by_todo(todo.id_typed()).await.unwrap(),
            vec![comment]
        );
    }

    #[tokio::test]
    async fn create_comment_on_done_todo_conflicts_even_with_invalid_message() {
        let store = store();
        let todo = CreateTodoHandler::new(store.clone())
            .handle(CreateTodo {
                title: "Task".into(),
            })
            .await
            .unwrap();
        UpdateTodoHandler::new(store.clone())
            .handle(UpdateTodo {
                id: todo.id_typed(),
                title: None,
                status: Some("done".into()),
            })
            .await
            .unwrap();

        let handler = CreateCommentHandler::new(store.clone(), store.clone());
        // The done rule precedes message validation; blank message or not,
        // the answer is a conflict.
        for message in ["hi", "   "] {
            let err = handler
                .handle(CreateComment {
                    todo_id: todo.id_typed(),
                    message: message.into(),
                })
                .await
                .unwrap_err();
            match err {
                HandlerError::Domain(DomainError::Conflict { code, .. }) => {
                    assert_eq!(code, COMMENT_FORBIDDEN_ON_DONE);
                }
                other => panic!("expected Conflict, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn create_comment_on_missing_todo_is_not_found_before_validation() {
        let store = store();
        let handler = CreateCommentHandler::new(store.clone(), store.clone());
        let err = handler
            .handle(CreateComment {
                todo_id: TodoId::new(),
                message: "   ".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Domain(DomainError::NotFound)));
    }
}
