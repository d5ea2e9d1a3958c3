use axum::{
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::hotspot::core::question::QuestionSummary;
use crate::modules::hotspot::use_cases::browse_questions::handler::DEFAULT_LIST_LIMIT;
use crate::shared::core::api_response::{ApiResponse, path_rejected, query_rejected};
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct GroupParams {
    pub group_id: String,
}

fn default_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

#[derive(Deserialize)]
pub struct ListParams {
    pub group_id: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Serialize)]
pub struct ListResponse {
    pub questions: Vec<QuestionSummary>,
    pub total: usize,
}

pub async fn get(
    State(state): State<AppState>,
    question_id: Result<Path<String>, PathRejection>,
    params: Result<Query<GroupParams>, QueryRejection>,
) -> Response {
    let Path(question_id) = match question_id {
        Ok(p) => p,
        Err(rejection) => return path_rejected(rejection),
    };
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return query_rejected(rejection),
    };

    match state.browse_handler.get(&params.group_id, &question_id).await {
        Ok(view) => ApiResponse::success("question found", view).into_response(),
        Err(e) => e.into_api_response("get question"),
    }
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return query_rejected(rejection),
    };

    match state.browse_handler.list(&params.group_id, params.limit).await {
        Ok(questions) => ApiResponse::success(
            "questions listed",
            ListResponse {
                total: questions.len(),
                questions,
            },
        )
        .into_response(),
        Err(e) => e.into_api_response("list questions"),
    }
}

pub async fn stats(
    State(state): State<AppState>,
    params: Result<Query<GroupParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(p) => p,
        Err(rejection) => return query_rejected(rejection),
    };

    match state.browse_handler.stats(&params.group_id).await {
        Ok(stats) => ApiResponse::success("stats collected", stats).into_response(),
        Err(e) => e.into_api_response("get stats"),
    }
}

#[cfg(test)]
mod browse_questions_http_inbound_tests {
    use axum::{Router, http::StatusCode, routing::get};
    use serde_json::json;

    use super::{get as get_question, list, stats};
    use crate::tests::fixtures::questions::AddQuestionBuilder;
    use crate::tests::fixtures::state::{get_request, make_test_state, send};

    async fn seeded_app() -> Router {
        let state = make_test_state();
        for (id, category) in [("q-1", "account"), ("q-2", "billing")] {
            state
                .add_handler
                .handle(
                    "acme",
                    AddQuestionBuilder::new().question_id(id).category(category).build(),
                )
                .await
                .unwrap();
        }
        Router::new()
            .route("/hotspot/questions", get(list))
            .route("/hotspot/questions/{question_id}", get(get_question))
            .route("/hotspot/stats", get(stats))
            .with_state(state)
    }

    #[tokio::test]
    async fn it_should_get_a_question() {
        let (status, json) = send(
            seeded_app().await,
            get_request("/hotspot/questions/q-1?group_id=acme"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["question_id"], "q-1");
        assert_eq!(json["data"]["related_links"], json!(["https://example.com/reset"]));
        assert!(json["data"].get("query_vector").is_none());
    }

    #[tokio::test]
    async fn it_should_return_404_for_an_unknown_question() {
        let (status, json) = send(
            seeded_app().await,
            get_request("/hotspot/questions/q-9?group_id=acme"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], 404);
    }

    #[tokio::test]
    async fn it_should_wrap_a_malformed_question_id_in_the_envelope() {
        let (status, json) = send(
            seeded_app().await,
            get_request("/hotspot/questions/%FF?group_id=acme"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn it_should_return_400_without_a_group() {
        let (status, json) =
            send(seeded_app().await, get_request("/hotspot/questions/q-1")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["status"], "error");
    }

    #[tokio::test]
    async fn it_should_list_questions() {
        let (status, json) = send(
            seeded_app().await,
            get_request("/hotspot/questions?group_id=acme&limit=1"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["questions"][0]["key"], "acme:q-1");
    }

    #[tokio::test]
    async fn it_should_reject_an_out_of_range_limit() {
        let (status, _) = send(
            seeded_app().await,
            get_request("/hotspot/questions?group_id=acme&limit=1001"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn it_should_report_stats() {
        let (status, json) =
            send(seeded_app().await, get_request("/hotspot/stats?group_id=acme")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json["data"],
            json!({
                "group_id": "acme",
                "total_questions": 2,
                "categories": {"account": 1, "billing": 1},
                "index_status": "active"
            })
        );
    }
}
