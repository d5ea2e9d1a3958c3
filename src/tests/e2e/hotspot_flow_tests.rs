use axum::http::StatusCode;
use serde_json::json;

use crate::shell::http::router;
use crate::tests::fixtures::state::{get_request, make_test_state, post_json, send};

#[tokio::test]
async fn manages_and_queries_hotspot_questions_for_a_group() {
    let app = router(make_test_state());

    let (status, json) = send(
        app.clone(),
        post_json(
            "/hotspot/questions/batch",
            json!({
                "group_id": "acme",
                "question_info_list": [
                    {
                        "question_id": "q-1",
                        "question": "How do I reset my password?",
                        "standard_reply": "Use the reset link on the login page.",
                        "category": "account"
                    },
                    {
                        "question_id": "q-2",
                        "question": "What are your opening hours?",
                        "standard_reply": "Nine to five on weekdays.",
                        "related_links": ["https://example.com/hours"]
                    }
                ]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success_count"], 2);

    let (_, json) = send(
        app.clone(),
        post_json(
            "/hotspot/query",
            json!({"group_id": "acme", "query": "opening hours"}),
        ),
    )
    .await;
    assert_eq!(json["data"]["total"], 1);
    assert_eq!(json["data"]["results"][0]["question_id"], "q-2");
    assert_eq!(json["data"]["results"][0]["category"], "general");

    let (status, _) = send(
        app.clone(),
        post_json(
            "/hotspot/questions/q-2/update",
            json!({"group_id": "acme", "question": "How do I change my email address?"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send(
        app.clone(),
        post_json(
            "/hotspot/query",
            json!({"group_id": "acme", "query": "opening hours"}),
        ),
    )
    .await;
    assert_eq!(json["data"]["total"], 0);
    assert_eq!(json["data"]["search_params"]["original_count"], 2);

    let (_, json) = send(app.clone(), get_request("/hotspot/stats?group_id=acme")).await;
    assert_eq!(json["data"]["total_questions"], 2);
    assert_eq!(json["data"]["categories"], json!({"account": 1, "general": 1}));

    let (status, _) = send(
        app.clone(),
        post_json("/hotspot/questions/q-1/delete", json!({"group_id": "acme"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(app.clone(), get_request("/hotspot/questions/q-1?group_id=acme")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(app, get_request("/hotspot/questions?group_id=other")).await;
    assert_eq!(json["data"], json!({"questions": [], "total": 0}));
}
