use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use crate::modules::hotspot::adapters::outbound::hashing_embeddings::HashingEmbeddings;
use crate::modules::hotspot::adapters::outbound::in_memory_question_store::InMemoryQuestionStore;
use crate::modules::hotspot::use_cases::query_questions::handler::SearchSettings;
use crate::shell::state::AppState;
use crate::tests::fixtures::questions::TEST_DIMENSION;

pub fn make_state(store: InMemoryQuestionStore, embeddings: HashingEmbeddings) -> AppState {
    AppState::new(
        Arc::new(store),
        Arc::new(embeddings),
        SearchSettings::default(),
    )
}

pub fn make_test_state() -> AppState {
    make_state(
        InMemoryQuestionStore::new(),
        HashingEmbeddings::new(TEST_DIMENSION),
    )
}

pub fn make_offline_store_state() -> AppState {
    let mut store = InMemoryQuestionStore::new();
    store.toggle_offline();
    make_state(store, HashingEmbeddings::new(TEST_DIMENSION))
}

pub fn make_offline_embeddings_state() -> AppState {
    let mut embeddings = HashingEmbeddings::new(TEST_DIMENSION);
    embeddings.toggle_offline();
    make_state(InMemoryQuestionStore::new(), embeddings)
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Sends one request and decodes the JSON answer.
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}
