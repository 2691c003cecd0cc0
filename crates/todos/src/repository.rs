//! Repository ports for the todos module, plus the in-memory backend used
//! for dev and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;

use tasklist_core::{CommentId, TodoId};

use crate::comment::Comment;
use crate::todo::Todo;

/// Storage backend failure. Deterministic domain failures never go through
/// here; this is for the engine itself (connection loss, poisoned lock).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Persistence gateway for todos.
///
/// `list` returns todos newest-first by creation time. `save` upserts the
/// full row (last write wins; no version token). `delete` cascades to the
/// todo's comments, making the aggregate's composition explicit at the
/// storage seam.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn find(&self, id: TodoId) -> Result<Option<Todo>, StoreError>;
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;
    async fn save(&self, todo: &Todo) -> Result<(), StoreError>;
    async fn delete(&self, id: TodoId) -> Result<(), StoreError>;
}

/// Persistence gateway for comments.
///
/// `list_by_todo` returns comments newest-first by creation time.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn save(&self, comment: &Comment) -> Result<(), StoreError>;
    async fn list_by_todo(&self, todo_id: TodoId) -> Result<Vec<Comment>, StoreError>;
}

/// In-memory store for dev and tests.
///
/// Implements both repository ports over the same state so the cascade on
/// [`TodoRepository::delete`] can reach the comments, the way the relational
/// backend's `ON DELETE CASCADE` does.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    todos: RwLock<HashMap<TodoId, Todo>>,
    comments: RwLock<HashMap<CommentId, Comment>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoRepository for InMemoryStore {
    async fn find(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let todos = self
            .todos
            .read()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        Ok(todos.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = self
            .todos
            .read()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        let mut all: Vec<Todo> = todos.values().cloned().collect();
        // Newest first; id as tiebreaker (UUIDv7 ids are time-ordered).
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().as_uuid().cmp(a.id_typed().as_uuid()))
        });
        Ok(all)
    }

    async fn save(&self, todo: &Todo) -> Result<(), StoreError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        todos.insert(todo.id_typed(), todo.clone());
        Ok(())
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        let mut todos = self
            .todos
            .write()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        todos.remove(&id);
        drop(todos);

        let mut comments = self
            .comments
            .write()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        comments.retain(|_, c| c.todo_id() != id);
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn save(&self, comment: &Comment) -> Result<(), StoreError> {
        let mut comments = self
            .comments
            .write()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        comments.insert(comment.id_typed(), comment.clone());
        Ok(())
    }

    async fn list_by_todo(&self, todo_id: TodoId) -> Result<Vec<Comment>, StoreError> {
        let comments = self
            .comments
            .read()
            .map_err(|e| StoreError::backend(e.to_string()))?;
        let mut matching: Vec<Comment> = comments
            .values()
            .filter(|c| c.todo_id() == todo_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id_typed().as_uuid().cmp(a.id_typed().as_uuid()))
        });
        Ok(matching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_then_find_round_trips() {
        let store = InMemoryStore::new();
        let todo = Todo::new("Task").unwrap();
        TodoRepository::save(&store, &todo).await.unwrap();

        let found = store.find(todo.id_typed()).await.unwrap();
        assert_eq!(found, Some(todo));
    }

    #[tokio::test]
    async fn find_unknown_id_returns_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.find(TodoId::new()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_is_an_upsert() {
        let store = InMemoryStore::new();
        let mut todo = Todo::new("Task").unwrap();
        TodoRepository::save(&store, &todo).await.unwrap();

        todo.rename(Some("Task updated")).unwrap();
        TodoRepository::save(&store, &todo).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
        let found = store.find(todo.id_typed()).await.unwrap().unwrap();
        assert_eq!(found.title(), "Task updated");
    }

    #[tokio::test]
    async fn list_returns_todos_newest_first() {
        let store = InMemoryStore::new();
        for title in ["first", "second", "third"] {
            let todo = Todo::new(title).unwrap();
            TodoRepository::save(&store, &todo).await.unwrap();
        }

        let listed = store.list().await.unwrap();
        let titles: Vec<&str> = listed.iter().map(|t| t.title()).collect();
        assert_eq!(titles, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn comments_list_newest_first_and_only_for_their_todo() {
        let store = InMemoryStore::new();
        let todo_a = Todo::new("A").unwrap();
        let todo_b = Todo::new("B").unwrap();
        TodoRepository::save(&store, &todo_a).await.unwrap();
        TodoRepository::save(&store, &todo_b).await.unwrap();

        for msg in ["one", "two"] {
            let c = Comment::new(&todo_a, msg).unwrap();
            CommentRepository::save(&store, &c).await.unwrap();
        }
        let other = Comment::new(&todo_b, "elsewhere").unwrap();
        CommentRepository::save(&store, &other).await.unwrap();

        let listed = store.list_by_todo(todo_a.id_typed()).await.unwrap();
        let messages: Vec<&str> = listed.iter().map(|c| c.message()).collect();
        assert_eq!(messages, vec!["two", "one"]);
    }

    #[tokio::test]
    async fn deleting_a_todo_cascades_to_its_comments() {
        let store = InMemoryStore::new();
        let todo = Todo::new("Task").unwrap();
        let kept = Todo::new("Kept").unwrap();
        TodoRepository::save(&store, &todo).await.unwrap();
        TodoRepository::save(&store, &kept).await.unwrap();

        let doomed = Comment::new(&todo, "gone with the todo").unwrap();
        let survivor = Comment::new(&kept, "unaffected").unwrap();
        CommentRepository::save(&store, &doomed).await.unwrap();
        CommentRepository::save(&store, &survivor).await.unwrap();

        store.delete(todo.id_typed()).await.unwrap();

        assert_eq!(store.find(todo.id_typed()).await.unwrap(), None);
        assert!(store
            .list_by_todo(todo.id_typed())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            store.list_by_todo(kept.id_typed()).await.unwrap().len(),
            1
        );
    }
}
