use axum::{
    extract::{DefaultBodyLimit, Request},
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::Level;

use super::handlers::{faults, health, maintenance, monitoring, plants, AppState};

pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let upload_limit = state.upload_limit;
    let public_routes = Router::new().route("/health", get(health::health));

    let api_routes = Router::new()
        .route(
            "/api/plants",
            get(plants::get_all_plants).post(plants::create_plant),
        )
        .route(
            "/api/plants/{plant_id}",
            get(plants::get_plant)
                .put(plants::update_plant)
                .delete(plants::delete_plant),
        )
        .route("/api/live/{plant_id}", get(monitoring::get_live_data))
        .route("/api/history/{plant_id}", get(monitoring::get_history))
        // Paths the existing dashboard calls
        .route("/api/live-data/{plant_id}", get(monitoring::get_live_data))
        .route(
            "/api/historical-data/{plant_id}",
            get(monitoring::get_historical_data),
        )
        .route(
            "/api/fault-detection",
            post(faults::detect_faults).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/alerts", get(faults::get_alerts))
        .route(
            "/api/maintenance/{plant_id}",
            get(maintenance::get_maintenance),
        );

    let mut router = Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .with_state(state);

    if let Some(dir) = static_dir {
        // Unknown paths fall through to the dashboard's index.html
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(spa);
    }

    router.layer(CorsLayer::permissive()).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            })
            .on_request(|_request: &Request, _span: &tracing::Span| {
                tracing::event!(Level::DEBUG, "received request");
            })
            .on_response(
                |response: &axum::response::Response,
                 latency: std::time::Duration,
                 _span: &tracing::Span| {
                    tracing::event!(
                        Level::INFO,
                        status = response.status().as_u16(),
                        latency = ?latency,
                        "request completed"
                    );
                },
            )
            .on_failure(
                |_error: tower_http::classify::ServerErrorsFailureClass,
                 _latency: std::time::Duration,
                 _span: &tracing::Span| {
                    tracing::event!(Level::ERROR, "request failed");
                },
            ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::MemoryDocumentStore;
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn fetch(router: Router, uri: &str) -> (StatusCode, String) {
        let response = router
            .oneshot(
                axum::http::Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn state() -> AppState {
        AppState::new(Arc::new(MemoryDocumentStore::new()), &Config::default())
    }

    #[tokio::test]
    async fn test_static_files_and_spa_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>dashboard</html>").unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log('hi')").unwrap();

        let router = create_router(state(), Some(dir.path()));

        let (status, body) = fetch(router.clone(), "/app.js").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "console.log('hi')");

        let (status, body) = fetch(router.clone(), "/plants/overview").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "<html>dashboard</html>");

        let (status, body) = fetch(router, "/api/alerts").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "[]");
    }

    #[tokio::test]
    async fn test_without_static_dir_unknown_path_is_404() {
        let (status, _) = fetch(create_router(state(), None), "/nowhere").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
