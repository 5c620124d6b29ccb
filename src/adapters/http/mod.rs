//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the intake API with the health check and the
//! tower-http layers for tracing, CORS and request timeouts.

pub mod intake;

pub use intake::{intake_router, IntakeAppState};

use axum::{extract::State, routing::get, Json, Router};
use http::HeaderValue;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Health check body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub predictor: String,
}

/// GET /health - Liveness check
async fn health(State(state): State<IntakeAppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        predictor: state.predictor.service_info().name,
    })
}

/// Builds the complete application router.
pub fn app_router(state: IntakeAppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(intake_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&server.cors_origins))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::adapters::prediction::MockPredictionService;
    use crate::adapters::storage::InMemorySessionStore;

    fn app() -> Router {
        let state = IntakeAppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MockPredictionService::new()),
        );
        app_router(state, &ServerConfig::default())
    }

    #[tokio::test]
    async fn health_reports_ok_and_predictor() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["predictor"], "mock");
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = app()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let server = ServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let state = IntakeAppState::new(
            Arc::new(InMemorySessionStore::new()),
            Arc::new(MockPredictionService::new()),
        );

        let response = app_router(state, &server)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("Origin", "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:5173"
        );
    }
}
