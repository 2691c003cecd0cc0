//! Query handlers: read-only use cases over the repositories.

use std::sync::Arc;

use tasklist_core::{DomainError, TodoId};

use crate::comment::Comment;
use crate::command::HandlerResult;
use crate::repository::{CommentRepository, TodoRepository};
use crate::todo::Todo;

/// Query: list all todos, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListTodos;

pub struct ListTodosHandler {
    todos: Arc<dyn TodoRepository>,
}

impl ListTodosHandler {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub async fn handle(&self, _query: ListTodos) -> HandlerResult<Vec<Todo>> {
        Ok(self.todos.list().await?)
    }
}

/// Query: fetch one todo by id.
#[derive(Debug, Clone)]
pub struct GetTodo {
    pub id: TodoId,
}

pub struct GetTodoHandler {
    todos: Arc<dyn TodoRepository>,
}

impl GetTodoHandler {
    pub fn new(todos: Arc<dyn TodoRepository>) -> Self {
        Self { todos }
    }

    pub async fn handle(&self, query: GetTodo) -> HandlerResult<Todo> {
        Ok(self
            .todos
            .find(query.id)
            .await?
            .ok_or(DomainError::NotFound)?)
    }
}

/// Query: list a todo's comments, newest first.
#[derive(Debug, Clone)]
pub struct ListComments {
    pub todo_id: TodoId,
}

pub struct ListCommentsHandler {
    todos: Arc<dyn TodoRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl ListCommentsHandler {
    pub fn new(todos: Arc<dyn TodoRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { todos, comments }
    }

    /// The parent todo must exist; listing comments of an unknown todo is a
    /// NotFound, not an empty list.
    pub async fn handle(&self, query: ListComments) -> HandlerResult<Vec<Comment>> {
        if self.todos.find(query.todo_id).await?.is_none() {
            return Err(DomainError::NotFound.into());
        }
        Ok(self.comments.list_by_todo(query.todo_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{
        CreateComment, CreateCommentHandler, CreateTodo, CreateTodoHandler, HandlerError,
    };
    use crate::repository::InMemoryStore;

    fn store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::new())
    }

    async fn seed_todo(store: &Arc<InMemoryStore>, title: &str) -> Todo {
        CreateTodoHandler::new(store.clone())
            .handle(CreateTodo {
                title: title.into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn list_todos_is_empty_initially_and_newest_first_after_seeding() {
        let store = store();
        let handler = ListTodosHandler::new(store.clone());
        assert!(handler.handle(ListTodos).await.unwrap().is_empty());

        seed_todo(&store, "older").await;
        seed_todo(&store, "newer").await;

        let listed = handler.handle(ListTodos).await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn get_todo_returns_the_aggregate() {
        let store = store();
        let todo = seed_todo(&store, "Task").await;

        let fetched = GetTodoHandler::new(store.clone())
            .handle(GetTodo {
                id: todo.id_typed(),
            })
            .await
            .unwrap();
        assert_eq!(fetched, todo);
    }

    #[tokio::test]
    async fn get_unknown_todo_is_not_found() {
        let err = GetTodoHandler::new(store())
            .handle(GetTodo { id: TodoId::new() })
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Domain(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn list_comments_requires_an_existing_todo() {
        let store = store();
        let err = ListCommentsHandler::new(store.clone(), store.clone())
            .handle(ListComments {
                todo_id: TodoId::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, HandlerError::Domain(DomainError::NotFound)));
    }

    #[tokio::test]
    async fn list_comments_returns_newest_first() {
        let store = store();
        let todo = seed_todo(&store, "Task").await;
        let comments = CreateCommentHandler::new(store.clone(), store.clone());
        for message in ["one", "two", "three"] {
            comments
                .handle(CreateComment {
                    todo_id: todo.id_typed(),
                    message: message.into(),
                })
                .await
                .unwrap();
        }

        let listed = ListCommentsHandler::new(store.clone(), store.clone())
            .handle(ListComments {
                todo_id: todo.id_typed(),
            })
            .await
            .unwrap();
        let messages: Vec<&str> = listed.iter().map(|c| c.message()).collect();
        assert_eq!(messages, vec!["three", "two", "one"]);
    }
}
