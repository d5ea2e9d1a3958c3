use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::modules::hotspot::core::question::ScoredQuestion;
use crate::modules::hotspot::use_cases::query_questions::handler::{
    BatchQueryEntry, DEFAULT_QUERY_LIMIT,
};
use crate::shared::core::api_response::{ApiResponse, json_rejected};
use crate::shell::state::AppState;

fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

#[derive(Deserialize)]
pub struct QueryBody {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    pub group_id: String,
}

#[derive(Deserialize)]
pub struct BatchQueryBody {
    pub queries: Vec<String>,
    pub group_id: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Serialize)]
pub struct SearchParams {
    pub min_similarity: f32,
    pub original_count: usize,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub results: Vec<ScoredQuestion>,
    pub total: usize,
    pub search_params: SearchParams,
}

#[derive(Serialize)]
pub struct BatchSearchParams {
    pub min_similarity: f32,
    pub limit_per_query: usize,
}

#[derive(Serialize)]
pub struct BatchQueryResponse {
    pub queries: Vec<BatchQueryEntry>,
    pub total_queries: usize,
    pub search_params: BatchSearchParams,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    tracing::info!(group_id = %body.group_id, query = %body.query, "received query request");

    match state
        .query_handler
        .handle(&body.group_id, &body.query, body.limit)
        .await
    {
        Ok(outcome) => ApiResponse::success(
            "query succeeded",
            QueryResponse {
                query: outcome.query,
                results: outcome.results,
                total: outcome.total,
                search_params: SearchParams {
                    min_similarity: state.query_handler.min_similarity(),
                    original_count: outcome.original_count,
                },
            },
        )
        .into_response(),
        Err(e) => e.into_api_response("query questions"),
    }
}

pub async fn handle_batch(
    State(state): State<AppState>,
    body: Result<Json<BatchQueryBody>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return json_rejected(rejection),
    };
    tracing::info!(
        group_id = %body.group_id,
        count = body.queries.len(),
        "received batch query request"
    );

    let limit = body.limit;
    match state
        .query_handler
        .handle_batch(&body.group_id, body.queries, limit)
        .await
    {
        Ok(entries) => ApiResponse::success(
            "batch query succeeded",
            BatchQueryResponse {
                total_queries: entries.len(),
                queries: entries,
                search_params: BatchSearchParams {
                    min_similarity: state.query_handler.min_similarity(),
                    limit_per_query: limit,
                },
            },
        )
        .into_response(),
        Err(e) => e.into_api_response("query questions batch"),
    }
}
