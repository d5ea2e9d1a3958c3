use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::modules::hotspot::use_cases::add_question::inbound::http as add_http;
use crate::modules::hotspot::use_cases::browse_questions::inbound::http as browse_http;
use crate::modules::hotspot::use_cases::delete_questions::inbound::http as delete_http;
use crate::modules::hotspot::use_cases::query_questions::inbound::http as query_http;
use crate::modules::hotspot::use_cases::rebuild_index::inbound::http as rebuild_http;
use crate::modules::hotspot::use_cases::update_question::inbound::http as update_http;
use crate::shell::state::AppState;

pub const SERVICE_NAME: &str = "hotspot-questions";

pub fn hotspot_router() -> Router<AppState> {
    Router::new()
        .route("/questions", post(add_http::handle).get(browse_http::list))
        .route("/questions/batch", post(add_http::handle_batch))
        .route("/questions/{question_id}", get(browse_http::get))
        .route("/questions/{question_id}/update", post(update_http::handle))
        .route("/questions/{question_id}/delete", post(delete_http::handle))
        .route(
            "/categories/{category}/delete",
            post(delete_http::handle_category),
        )
        .route("/query", post(query_http::handle))
        .route("/query/batch", post(query_http::handle_batch))
        .route("/stats", get(browse_http::stats))
        .route("/admin/index/{group_id}", post(rebuild_http::handle))
        .route("/health", get(hotspot_health))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/hotspot", hotspot_router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "hotspot": "/hotspot",
            "health": "/hotspot/health"
        }
    }))
}

async fn hotspot_health() -> Json<Value> {
    Json(json!({"status": "healthy", "service": "hotspot"}))
}

/// Reports `degraded` while the question store cannot be reached.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let (status, hotspot) = match state.store.ping().await {
        Ok(()) => ("healthy", "active"),
        Err(e) => {
            tracing::warn!(error = %e, "question store unreachable");
            ("degraded", "unavailable")
        }
    };
    (
        StatusCode::OK,
        Json(json!({"status": status, "services": {"hotspot": hotspot}})),
    )
}
