use axum::{
    extract::{Path, State, rejection::PathRejection},
    response::{IntoResponse, Response},
};

use crate::shared::core::api_response::{ApiResponse, path_rejected};
use crate::shell::state::AppState;

pub async fn handle(
    State(state): State<AppState>,
    group_id: Result<Path<String>, PathRejection>,
) -> Response {
    let Path(group_id) = match group_id {
        Ok(p) => p,
        Err(rejection) => return path_rejected(rejection),
    };
    tracing::info!(group_id, "received rebuild index request");

    match state.rebuild_handler.handle(&group_id).await {
        Ok(()) => ApiResponse::<()>::ok(format!("index {group_id} rebuilt")).into_response(),
        Err(e) => e.into_api_response("rebuild index"),
    }
}
