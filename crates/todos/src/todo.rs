use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use tasklist_core::{DomainError, DomainResult, Entity, TodoId};

/// Maximum title length, counted in Unicode scalar values after trimming.
pub const TITLE_MAX_CHARS: usize = 200;

/// Todo status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Open,
    Done,
}

impl TodoStatus {
    /// Parse a wire-level status string.
    ///
    /// Anything other than `open`/`done` is a validation failure, not a 404;
    /// the field reached us, its value is just outside the enum.
    pub fn parse(s: &str) -> DomainResult<Self> {
        match s {
            "open" => Ok(Self::Open),
            "done" => Ok(Self::Done),
            _ => Err(DomainError::violation(
                "status",
                "Status must be one of: open, done.",
                "invalid_choice",
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Done => "done",
        }
    }
}

impl core::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate root: a todo item owning its comments.
///
/// All field invariants are enforced here, on construction and on mutation;
/// no invalid `Todo` value ever exists. Repositories rehydrate persisted
/// rows through [`Todo::hydrate`], which trusts the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: TodoId,
    title: String,
    status: TodoStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new open todo with a fresh id.
    ///
    /// Fails if the title is empty after trimming or longer than
    /// [`TITLE_MAX_CHARS`]. `created_at == updated_at` at birth.
    pub fn new(title: &str) -> DomainResult<Self> {
        let title = validate_title(title)?;
        let now = Utc::now();
        Ok(Self {
            id: TodoId::new(),
            title,
            status: TodoStatus::Open,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a persisted todo. Bypasses validation; the row was
    /// validated on the way in.
    pub fn hydrate(
        id: TodoId,
        title: String,
        status: TodoStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id_typed(&self) -> TodoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TodoStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Change the title. `None` is a no-op (PATCH semantics); `Some` goes
    /// through the same validation as creation and bumps `updated_at`.
    pub fn rename(&mut self, title: Option<&str>) -> DomainResult<()> {
        let Some(title) = title else {
            return Ok(());
        };
        self.title = validate_title(title)?;
        self.touch();
        Ok(())
    }

    /// Change the status. `None` is a no-op; an unknown status string fails
    /// validation; success bumps `updated_at`.
    pub fn change_status(&mut self, status: Option<&str>) -> DomainResult<()> {
        let Some(status) = status else {
            return Ok(());
        };
        self.status = TodoStatus::parse(status)?;
        self.touch();
        Ok(())
    }

    /// Invariant helper: whether this todo accepts new comments.
    ///
    /// Done todos are closed for discussion.
    pub fn can_accept_comments(&self) -> bool {
        self.status != TodoStatus::Done
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Entity for Todo {
    type Id = TodoId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

fn validate_title(title: &str) -> DomainResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::violation(
            "title",
            "Title must not be blank.",
            "not_blank",
        ));
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::violation(
            "title",
            format!("Title must be at most {TITLE_MAX_CHARS} characters."),
            "too_long",
        ));
    }
    Ok(title.to_string())
}
