use chrono::{DateTime, Utc};

use tasklist_core::{CommentId, DomainError, DomainResult, Entity, TodoId};

use crate::todo::Todo;

/// Maximum message length, counted in Unicode scalar values after trimming.
pub const MESSAGE_MAX_CHARS: usize = 2000;

/// Rule code surfaced when a comment targets a done todo.
pub const COMMENT_FORBIDDEN_ON_DONE: &str = "todo.comment.forbidden_on_done";

/// A comment on a todo. Immutable after creation.
///
/// The back-reference to the owning todo is non-nullable: a comment cannot
/// be constructed without one. Whether that todo currently *accepts*
/// comments is the command handler's check, made before construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    todo_id: TodoId,
    message: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on `todo`.
    ///
    /// Fails if the message is empty after trimming or longer than
    /// [`MESSAGE_MAX_CHARS`].
    pub fn new(todo: &Todo, message: &str) -> DomainResult<Self> {
        let message = validate_message(message)?;
        Ok(Self {
            id: CommentId::new(),
            todo_id: todo.id_typed(),
            message,
            created_at: Utc::now(),
        })
    }

    /// Rehydrate a persisted comment. Bypasses validation.
    pub fn hydrate(
        id: CommentId,
        todo_id: TodoId,
        message: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            todo_id,
            message,
            created_at,
        }
    }

    pub fn id_typed(&self) -> CommentId {
        self.id
    }

    pub fn todo_id(&self) -> TodoId {
        self.todo_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Comment {
    type Id = CommentId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_message(message: &str) -> DomainResult<String> {
    let message = message.trim();
    if message.is_empty() {
        return Err(DomainError::violation(
            "message",
            "Message must not be blank.",
            "not_blank",
        ));
    }
    if message.chars().count() > MESSAGE_MAX_CHARS {
        return Err(DomainError::violation(
            "message",
            format!("Message must be at most {MESSAGE_MAX_CHARS} characters."),
            "too_long",
        ));
    }
    Ok(message.to_string())
}
