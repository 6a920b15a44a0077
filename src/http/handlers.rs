//! Route handlers.
//!
//! Each handler decodes its input, runs the matching `ConfigService`
//! operation on the blocking pool and records request metrics.

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::service::{ConfigService, UpdateRequest};

/// Run a blocking service call off the async runtime.
async fn blocking<T, F>(service: &ConfigService, f: F) -> Result<T, StoreError>
where
    F: FnOnce(&ConfigService) -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    let service = service.clone();
    tokio::task::spawn_blocking(move || f(&service))
        .await
        .map_err(|e| StoreError::Storage(std::io::Error::other(e)))?
}

fn decode_json(body: &Bytes) -> Result<Value, StoreError> {
    if body.is_empty() {
        return Err(StoreError::MissingInput("no JSON data provided"));
    }
    serde_json::from_slice(body).map_err(|_| StoreError::MissingInput("request body is not valid JSON"))
}

fn finish(operation: &'static str, start: Instant, result: Result<Response, StoreError>) -> Response {
    let response = result.unwrap_or_else(IntoResponse::into_response);
    metrics::record_request(operation, response.status().as_u16(), start);
    response
}

/// `POST /v1/config-create/{name}`
pub async fn create_config(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    tracing::info!(document = %name, "Config create requested");
    finish("config_create", start, create_config_response(&state, name, body).await)
}

async fn create_config_response(state: &AppState, name: String, body: Bytes) -> Result<Response, StoreError> {
    let body = decode_json(&body)?;
    let id = blocking(&state.service, move |s| s.create_config(&name, &body)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": format!("configuration {} created", id.file_name()),
        })),
    )
        .into_response())
}

/// `GET /v1/read/{*path}`
pub async fn read_parameter(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    let start = Instant::now();
    tracing::info!(path = %path, "Parameter read requested");

    let result = blocking(&state.service, move |s| s.read(&path))
        .await
        .map(|outcome| {
            Json(json!({
                "status": "true",
                "parameter": outcome.parameter.to_string(),
                "value": outcome.value,
            }))
            .into_response()
        });

    finish("read", start, result)
}

/// `POST /v1/update` with body `{"path": ..., "value": ...}`
pub async fn update_parameter(State(state): State<AppState>, body: Bytes) -> Response {
    let start = Instant::now();
    tracing::info!("Parameter update requested");
    finish("update", start, update_response(&state, body).await)
}

async fn update_response(state: &AppState, body: Bytes) -> Result<Response, StoreError> {
    let body = decode_json(&body)?;
    let request: UpdateRequest = serde_json::from_value(body)
        .map_err(|_| StoreError::MissingInput("both 'path' and 'value' are required"))?;
    let outcome = blocking(&state.service, move |s| s.update(request)).await?;

    Ok(Json(json!({
        "status": "success",
        "message": format!("parameter {} updated", outcome.parameter),
        "file": outcome.document.file_name(),
        "parameter": outcome.parameter.to_string(),
        "value": outcome.value,
        "validation": outcome.validation,
    }))
    .into_response())
}

/// `POST /v1/create-validate/{name}`
pub async fn create_validator(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    tracing::info!(validator = %name, "Validator create requested");
    finish("validator_create", start, create_validator_response(&state, name, body).await)
}

async fn create_validator_response(state: &AppState, name: String, body: Bytes) -> Result<Response, StoreError> {
    let body = decode_json(&body)?;
    let file = format!("{name}.json");
    let path = std::path::Path::new(&state.validators_dir).join(&file);
    blocking(&state.service, move |s| s.create_validator(&name, &body)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "success",
            "message": format!("validator {file} created"),
            "path": path.display().to_string(),
        })),
    )
        .into_response())
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
