use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::shared::core::api_response::{ApiResponse, json_rejected, path_rejected};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct DeleteBody {
    pub group_id: String,
}

#[derive(Serialize)]
pub struct CategoryDeleted {
    pub category: String,
    pub deleted_count: u64,
}

pub async fn handle(
    State(state): State<AppState>,
    question_id: Result<Path<String>, PathRejection>,
    body: Result<Json<DeleteBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let Path(question_id) = match question_id {
        Ok(p) => p,
        Err(rejection) => return path_rejected(rejection),
    };
    tracing::info!(group_id = %body.group_id, question_id, "received delete question request");

    match state.delete_handler.delete(&body.group_id, &question_id).await {
        Ok(()) => ApiResponse::<()>::ok("question deleted").into_response(),
        Err(e) => e.into_api_response("delete question"),
    }
}

pub async fn handle_category(
    State(state): State<AppState>,
    category: Result<Path<String>, PathRejection>,
    body: Result<Json<DeleteBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let Path(category) = match category {
        Ok(p) => p,
        Err(rejection) => return path_rejected(rejection),
    };
    tracing::info!(group_id = %body.group_id, category, "received delete category request");

    match state
        .delete_handler
        .delete_by_category(&body.group_id, &category)
        .await
    {
        Ok(deleted_count) => ApiResponse::success(
            format!("deleted {deleted_count} questions"),
            CategoryDeleted {
                category,
                deleted_count,
            },
        )
        .into_response(),
        Err(e) => e.into_api_response("delete category"),
    }
}
