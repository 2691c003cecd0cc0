use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tasklist_todos::{Comment, Todo};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub message: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoResponse {
    pub fn from_entity(todo: &Todo) -> Self {
        Self {
            id: todo.id_typed().to_string(),
            title: todo.title().to_string(),
            status: todo.status().to_string(),
            created_at: todo.created_at(),
            updated_at: todo.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub todo_id: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl CommentResponse {
    pub fn from_entity(comment: &Comment) -> Self {
        Self {
            id: comment.id_typed().to_string(),
            todo_id: comment.todo_id().to_string(),
            message: comment.message().to_string(),
            created_at: comment.created_at(),
        }
    }
}
