//! Domain error model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A single failed validation constraint.
///
/// `property_path` names the offending field (`title`, `message`, `status`),
/// `code` is a stable machine-readable constraint identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub property_path: String,
    pub message: String,
    pub code: String,
}

impl Violation {
    pub fn new(
        property_path: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            property_path: property_path.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// invariants, conflicts). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more values failed validation.
    #[error("validation failed")]
    Validation(Vec<Violation>),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A business rule rejected an otherwise well-formed request.
    ///
    /// `code` is the rule-specific machine-readable identifier exposed on
    /// the wire (e.g. `todo.comment.forbidden_on_done`).
    #[error("conflict: {message}")]
    Conflict {
        code: &'static str,
        message: String,
    },
}

impl DomainError {
    pub fn validation(violations: Vec<Violation>) -> Self {
        Self::Validation(violations)
    }

    /// Single-violation convenience constructor.
    pub fn violation(
        property_path: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Validation(vec![Violation::new(property_path, message, code)])
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
