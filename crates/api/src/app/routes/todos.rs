use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use tasklist_core::TodoId;
use tasklist_todos::{CreateTodo, GetTodo, ListTodos, UpdateTodo};

use crate::app::routes::comments;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_todo).get(list_todos))
        .route("/:id", get(get_todo).patch(update_todo))
        .route(
            "/:id/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
}

/// Parse a path id; a malformed id maps to the same response as an unknown
/// one.
pub(super) fn parse_todo_id(raw: &str) -> Result<TodoId, axum::response::Response> {
    raw.parse::<TodoId>()
        .map_err(errors::domain_error_to_response)
}

pub async fn create_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateTodoRequest>,
) -> axum::response::Response {
    match services
        .create_todo
        .handle(CreateTodo { title: body.title })
        .await
    {
        Ok(todo) => {
            tracing::info!(todo_id = %todo.id_typed(), "todo created");
            (StatusCode::CREATED, Json(dto::TodoResponse::from_entity(&todo))).into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn list_todos(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_todos.handle(ListTodos).await {
        Ok(todos) => {
            let items: Vec<dto::TodoResponse> =
                todos.iter().map(dto::TodoResponse::from_entity).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn get_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_todo_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.get_todo.handle(GetTodo { id }).await {
        Ok(todo) => (StatusCode::OK, Json(dto::TodoResponse::from_entity(&todo))).into_response(),
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn update_todo(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateTodoRequest>,
) -> axum::response::Response {
    let id = match parse_todo_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services
        .update_todo
        .handle(UpdateTodo {
            id,
            title: body.title,
            status: body.status,
        })
        .await
    {
        Ok(todo) => {
            tracing::info!(todo_id = %todo.id_typed(), status = %todo.status(), "todo updated");
            (StatusCode::OK, Json(dto::TodoResponse::from_entity(&todo))).into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}
