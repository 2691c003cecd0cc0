//! Todos domain module.
//!
//! This crate contains the Todo/Comment aggregate (entities enforcing their
//! own invariants), the repository ports they are persisted through, and one
//! command/query handler per use case. No HTTP, no storage engine here.

pub mod comment;
pub mod command;
pub mod query;
pub mod repository;
pub mod todo;

pub use comment::{Comment, COMMENT_FORBIDDEN_ON_DONE};
pub use command::{
    CreateComment, CreateCommentHandler, CreateTodo, CreateTodoHandler, HandlerError, UpdateTodo,
    UpdateTodoHandler,
};
pub use query::{
    GetTodo, GetTodoHandler, ListComments, ListCommentsHandler, ListTodos, ListTodosHandler,
};
pub use repository::{CommentRepository, InMemoryStore, StoreError, TodoRepository};
pub use todo::{Todo, TodoStatus};
