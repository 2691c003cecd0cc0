use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use serde_json::json;

use tasklist_core::DomainError;
use tasklist_todos::HandlerError;

/// Map a handler failure to its wire contract.
///
/// Validation → 422, not-found → 404, business-rule conflict → 409 with the
/// rule's own code; storage failures surface as opaque 500s.
pub fn handler_error_to_response(err: HandlerError) -> axum::response::Response {
    match err {
        HandlerError::Domain(e) => domain_error_to_response(e),
        HandlerError::Store(e) => {
            tracing::error!(error = %e, "storage backend failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal.error",
                "Internal server error",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(violations) => {
            let payload = json!({
                "code": "validation.failed",
                "message": "Validation failed",
                "violations": violations,
            });
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                [(header::CONTENT_TYPE, "application/problem+json")],
                axum::Json(payload),
            )
                .into_response()
        }
        // A malformed id in the path can never name an existing resource.
        DomainError::InvalidId(_) | DomainError::NotFound => json_error(
            StatusCode::NOT_FOUND,
            "resource.not_found",
            "Resource not found",
        ),
        DomainError::Conflict { code, message } => {
            (StatusCode::CONFLICT, axum::Json(json!({ "code": code, "message": message })))
                .into_response()
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "code": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
