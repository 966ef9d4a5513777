use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

use crate::fruits;
use crate::injection::FaultInjection;

pub const SEARCH_PATH: &str = "/api/search";

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchBody {
    query: String,
    results: Vec<String>,
}

/// Build the mock search router.
pub fn router(injection: Arc<FaultInjection>) -> Router {
    Router::new()
        .route(
            SEARCH_PATH,
            get(search).options(preflight).fallback(method_not_allowed),
        )
        .fallback(fallback)
        .with_state(injection)
        .layer(middleware::map_response(allow_any_origin))
        .layer(TraceLayer::new_for_http())
}

async fn allow_any_origin(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}

async fn search(
    State(injection): State<Arc<FaultInjection>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    let drawn = injection.draw();
    if !drawn.delay.is_zero() {
        tokio::time::sleep(drawn.delay).await;
    }

    if drawn.fail {
        warn!(%query, delay_ms = drawn.delay.as_millis() as u64, "injecting failure");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
            .into_response();
    }

    let results = fruits::matching(&query);
    debug!(%query, matches = results.len(), delay_ms = drawn.delay.as_millis() as u64, "search served");
    Json(SearchBody { query, results }).into_response()
}

async fn preflight() -> Response {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "GET, OPTIONS")],
        Json(json!({ "error": "Method not allowed" })),
    )
        .into_response()
}

/// Preflight for any path, 404 for everything else.
async fn fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return preflight().await;
    }
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}
