use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use tasklist_todos::{CreateComment, ListComments};

use crate::app::routes::todos::parse_todo_id;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn create_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CreateCommentRequest>,
) -> axum::response::Response {
    let todo_id = match parse_todo_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services
        .create_comment
        .handle(CreateComment {
            todo_id,
            message: body.message,
        })
        .await
    {
        Ok(comment) => {
            tracing::info!(
                todo_id = %comment.todo_id(),
                comment_id = %comment.id_typed(),
                "comment created"
            );
            (
                StatusCode::CREATED,
                Json(dto::CommentResponse::from_entity(&comment)),
            )
                .into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}

pub async fn list_comments(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let todo_id = match parse_todo_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    match services.list_comments.handle(ListComments { todo_id }).await {
        Ok(comments) => {
            let items: Vec<dto::CommentResponse> = comments
                .iter()
                .map(dto::CommentResponse::from_entity)
                .collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::handler_error_to_response(e),
    }
}
