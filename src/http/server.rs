//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, limits, request ID, security headers)
//! - Bind server to listener and shut down gracefully

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::http::{handlers, request};
use crate::security::{headers, limits};
use crate::service::ConfigService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: ConfigService,
    /// Validator directory as configured, reported back on create.
    pub validators_dir: String,
}

/// HTTP server for the config store.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a server over storage built from `config.storage`.
    pub fn new(config: ServiceConfig) -> Self {
        let service = ConfigService::from_config(&config.storage);
        Self::with_service(config, service)
    }

    /// Create a server over an existing service (e.g. shared in-memory storage).
    pub fn with_service(config: ServiceConfig, service: ConfigService) -> Self {
        let state = AppState {
            service,
            validators_dir: config.storage.validators_dir.clone(),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/v1/config-create/{name}", post(handlers::create_config))
            .route("/v1/read/{*path}", get(handlers::read_parameter))
            .route("/v1/update", post(handlers::update_parameter))
            .route("/v1/create-validate/{name}", post(handlers::create_validator))
            .fallback(handlers::not_found)
            .with_state(state);

        let mut router = limits::with_body_limit(router, config.security.max_body_size)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        if config.security.enable_headers {
            router = router.layer(headers::nosniff_layer());
        }

        router
            .layer(request::propagate_request_id_layer())
            .layer(TraceLayer::new_for_http().make_span_with(request::make_request_span))
            .layer(request::set_request_id_layer())
    }

    /// Router with all layers applied, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Draining in-flight requests");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        HttpServer::with_service(ServiceConfig::default(), ConfigService::in_memory()).router()
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty);
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();

        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let app = app();

        let (status, _) = send(
            &app,
            "POST",
            "/v1/config-create/db",
            Some(json!({"conn": {"host": "localhost"}})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/v1/read/db/conn/host", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], json!("localhost"));
        assert_eq!(body["parameter"], json!("conn/host"));
    }

    #[tokio::test]
    async fn test_error_kinds_map_to_status_codes() {
        let app = app();
        send(&app, "POST", "/v1/config-create/db", Some(json!({"a": 1}))).await;

        let (status, _) = send(&app, "GET", "/v1/read/db", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "GET", "/v1/read/db/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/v1/read/nope/a", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", "/v1/config-create/db", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_update_reports_validation_status() {
        let app = app();
        send(&app, "POST", "/v1/config-create/db", Some(json!({"port": "1"}))).await;
        let (status, body) =
            send(&app, "POST", "/v1/create-validate/db", Some(json!({"port": "[0-9]+"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["path"], json!("validators/db.json"));

        let (status, body) = send(
            &app,
            "POST",
            "/v1/update",
            Some(json!({"path": "db/port", "value": "80"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["validation"], json!("performed"));
        assert_eq!(body["file"], json!("db.json"));

        let (status, body) = send(
            &app,
            "POST",
            "/v1/update",
            Some(json!({"path": "db/port", "value": "eighty"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"]["parameter"], json!("port"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = send(&app(), "GET", "/v2/anything", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("not found"));
    }

    #[tokio::test]
    async fn test_request_id_is_assigned_and_echoed() {
        let app = app();
        let req = Request::builder()
            .uri("/v1/read/db/a")
            .header(request::X_REQUEST_ID, "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        assert_eq!(response.headers()[request::X_REQUEST_ID], "abc-123");

        let req = Request::builder().uri("/v1/read/db/a").body(Body::empty()).unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert!(response.headers().contains_key(request::X_REQUEST_ID));
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    }
}
