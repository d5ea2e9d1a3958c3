use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::hotspot::core::question::default_category;
use crate::modules::hotspot::use_cases::add_question::command::AddQuestion;
use crate::shared::core::api_response::{ApiResponse, json_rejected};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct QuestionInfoBody {
    pub question_id: String,
    pub question: String,
    pub standard_reply: String,
    #[serde(default)]
    pub related_links: Option<Vec<String>>,
    #[serde(default = "default_category")]
    pub category: String,
}

impl From<QuestionInfoBody> for AddQuestion {
    fn from(body: QuestionInfoBody) -> Self {
        Self {
            question_id: body.question_id,
            question: body.question,
            standard_reply: body.standard_reply,
            related_links: body.related_links.unwrap_or_default(),
            category: body.category,
        }
    }
}

#[derive(Deserialize)]
pub struct AddQuestionBody {
    pub question_info: QuestionInfoBody,
    pub group_id: String,
}

#[derive(Deserialize)]
pub struct AddQuestionBatchBody {
    pub question_info_list: Vec<QuestionInfoBody>,
    pub group_id: String,
}

#[derive(Serialize)]
pub struct AddQuestionResponse {
    pub question_id: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<AddQuestionBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    tracing::info!(
        group_id = %body.group_id,
        question_id = %body.question_info.question_id,
        "received add question request"
    );

    match state
        .add_handler
        .handle(&body.group_id, body.question_info.into())
        .await
    {
        Ok(question_id) => {
            ApiResponse::success("question added", AddQuestionResponse { question_id })
                .into_response()
        }
        Err(e) => e.into_api_response("add question"),
    }
}

pub async fn handle_batch(
    State(state): State<AppState>,
    body: Result<Json<AddQuestionBatchBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    tracing::info!(
        group_id = %body.group_id,
        count = body.question_info_list.len(),
        "received batch add request"
    );

    let commands = body.question_info_list.into_iter().map(Into::into).collect();
    match state.add_handler.handle_batch(&body.group_id, commands).await {
        Ok(outcome) => {
            let message = format!(
                "batch add finished: {} succeeded, {} failed",
                outcome.success_count, outcome.failed_count
            );
            ApiResponse::success(message, outcome).into_response()
        }
        Err(e) => e.into_api_response("add question batch"),
    }
}
