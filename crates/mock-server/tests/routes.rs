use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use typeahead_mock_server::{FaultInjection, router};

fn quiet_app() -> Router {
    router(Arc::new(FaultInjection::disabled()))
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn search_returns_prefix_matches() {
    let response = quiet_app()
        .oneshot(
            Request::builder()
                .uri("/api/search?q=Ap")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let body = json(&response.into_body().collect().await.unwrap().to_bytes());
    assert_eq!(body["query"], "Ap");
    assert_eq!(body["results"], serde_json::json!(["apple", "apricot"]));
}

#[tokio::test]
async fn query_is_url_decoded() {
    let (_, body) = send(quiet_app(), Method::GET, "/api/search?q=p%61p").await;
    assert_eq!(json(&body)["results"], serde_json::json!(["papaya"]));
}

#[tokio::test]
async fn missing_or_empty_query_returns_no_results() {
    for uri in ["/api/search", "/api/search?q=", "/api/search?q=%20%20"] {
        let (status, body) = send(quiet_app(), Method::GET, uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json(&body)["results"], serde_json::json!([]), "{uri}");
    }
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, body) = send(quiet_app(), Method::GET, "/api/other").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["error"], "Not found");
}

#[tokio::test]
async fn other_methods_on_search_get_a_json_405() {
    let (status, body) = send(quiet_app(), Method::POST, "/api/search?q=apple").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json(&body)["error"], "Method not allowed");
}

#[tokio::test]
async fn options_on_any_path_is_an_empty_204() {
    for uri in ["/api/search", "/anything/else"] {
        let response = quiet_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT, "{uri}");
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*",
            "{uri}"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert!(body.is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn injected_failure_is_a_500_with_error_body() {
    let app = router(Arc::new(FaultInjection::new(0, 0, 1.0).unwrap()));
    let (status, body) = send(app, Method::GET, "/api/search?q=apple").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["error"], "Internal server error");
}

#[tokio::test(start_paused = true)]
async fn latency_is_injected_before_answering() {
    let app = router(Arc::new(FaultInjection::new(400, 400, 0.0).unwrap()));
    let started = tokio::time::Instant::now();
    let (status, _) = send(app, Method::GET, "/api/search?q=kiwi").await;
    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(400));
}
