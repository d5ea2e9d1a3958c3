use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::modules::hotspot::use_cases::add_question::inbound::http::AddQuestionResponse;
use crate::modules::hotspot::use_cases::update_question::command::UpdateQuestion;
use crate::shared::core::api_response::{ApiResponse, json_rejected, path_rejected};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct UpdateQuestionBody {
    pub group_id: String,
    pub question: Option<String>,
    pub standard_reply: Option<String>,
    pub related_links: Option<Vec<String>>,
    pub category: Option<String>,
}

pub async fn handle(
    State(state): State<AppState>,
    question_id: Result<Path<String>, PathRejection>,
    body: Result<Json<UpdateQuestionBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    let Path(question_id) = match question_id {
        Ok(p) => p,
        Err(rejection) => return path_rejected(rejection),
    };
    tracing::info!(group_id = %body.group_id, question_id, "received update question request");

    let command = UpdateQuestion {
        question_id,
        question: body.question,
        standard_reply: body.standard_reply,
        related_links: body.related_links,
        category: body.category,
    };
    match state.update_handler.handle(&body.group_id, command).await {
        Ok(question_id) => {
            ApiResponse::success("question updated", AddQuestionResponse { question_id })
                .into_response()
        }
        Err(e) => e.into_api_response("update question"),
    }
}
