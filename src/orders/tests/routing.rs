use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;

fn post_json(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_vec(&payload).expect("serialize payload"),
        ))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn calculate_returns_metrics_and_decision() {
    let response = memory_router()
        .oneshot(post_json(
            "/calculate",
            json!({
                "pay": 20.0,
                "miles": 10.0,
                "minutes": 30.0,
                "target_hourly": 45.0,
                "min_per_mile": 1.0,
                "time_buffer_multiplier": 1.0,
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(
        payload,
        json!({
            "hourly_rate": 40.0,
            "dollars_per_mile": 2.0,
            "score": 42.0,
            "decision": "ONLY_IF_SLOW",
        })
    );
}

#[tokio::test]
async fn calculate_rejects_out_of_range_input() {
    let response = memory_router()
        .oneshot(post_json(
            "/calculate",
            json!({
                "pay": 20.0,
                "miles": 10.0,
                "minutes": 30.0,
                "target_hourly": 20.0,
                "min_per_mile": 1.0,
                "time_buffer_multiplier": 0.5,
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("time_buffer_multiplier"));
}

#[tokio::test]
async fn calculate_rejects_missing_fields() {
    let response = memory_router()
        .oneshot(post_json("/calculate", json!({ "pay": 20.0 })))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("missing field `miles`"));
}

#[tokio::test]
async fn malformed_bodies_get_json_errors() {
    let response = memory_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/calculate")
                .header("content-type", "application/json")
                .body(Body::from("{\"pay\": 20.0,"))
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert!(payload["error"].is_string());
}

#[tokio::test]
async fn log_then_stats_round_trip() {
    let router = memory_router();

    let response = router
        .clone()
        .oneshot(post_json(
            "/log",
            json!({
                "pay": 18.0,
                "miles": 6.0,
                "minutes": 24.0,
                "decision": "TAKE",
                "time": "2025-05-04T19:20:00Z",
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json_body(response).await,
        json!({ "status": "ok", "id": 1 })
    );

    let response = router
        .clone()
        .oneshot(get("/stats"))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["overall"]["total_orders"], 1);
    assert_eq!(payload["overall"]["accepted"], 1);
    assert_eq!(payload["best_hours"][0]["hour"], "19");
    assert_eq!(payload["by_day"][0]["day"], "2025-05-04");
    // 18 over 24 minutes, buffered to 27.6, is 39.13/hr.
    assert_eq!(payload["overall"]["avg_hourly"], 39.13);
}

#[tokio::test]
async fn log_rejects_bad_timestamps() {
    let response = memory_router()
        .oneshot(post_json(
            "/log",
            json!({
                "pay": 18.0,
                "miles": 6.0,
                "minutes": 24.0,
                "decision": "DECLINE",
                "time": "tomorrow morning",
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], "Invalid time format. Use ISO-8601.");
}

#[tokio::test]
async fn log_rejects_unknown_decisions() {
    let response = memory_router()
        .oneshot(post_json(
            "/log",
            json!({
                "pay": 18.0,
                "miles": 6.0,
                "minutes": 24.0,
                "decision": "MAYBE",
            }),
        ))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("MAYBE"));
}

#[tokio::test]
async fn storage_outages_surface_as_server_errors() {
    let router = unavailable_router();

    let response = router
        .clone()
        .oneshot(get("/stats"))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = router
        .oneshot(post_json(
            "/log",
            json!({ "pay": 9.0, "miles": 3.0, "minutes": 15.0, "decision": "TAKE" }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .expect("error message")
        .contains("disk offline"));
}
