//! HTTP transport - HashService を axum のルートに載せる
//!
//! | route | facade |
//! |---|---|
//! | `POST /hash` (form `password=...`) | submit |
//! | `GET /hash/{id}` | retrieve |
//! | `GET /stats` | stats |
//! | `GET /shutdown`, `POST /shutdown` | request_shutdown |
//!
//! 本文はプレーンテキスト（stats のみ JSON）。

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

use hashgen_core::{HashService, HashgenError, JobId, JobStatus, ShutdownOutcome};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HashService>,
}

#[derive(Debug, Deserialize)]
pub struct HashForm {
    password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub total: u64,
    /// milliseconds
    pub average: u64,
}

/// トランスポート層のエラー → HTTP ステータス
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Service(HashgenError),
}

impl From<HashgenError> for AppError {
    fn from(err: HashgenError) -> Self {
        AppError::Service(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Service(err @ HashgenError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            AppError::Service(err @ HashgenError::ServiceUnavailable) => {
                (StatusCode::SERVICE_UNAVAILABLE, err.to_string())
            }
            AppError::Service(err) => {
                tracing::error!(error = %err, "internal error while handling request");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, message).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/hash", post(submit_hash))
        .route("/hash/{id}", get(get_hash))
        .route("/stats", get(get_stats))
        .route("/shutdown", get(shutdown).post(shutdown))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn submit_hash(
    State(state): State<AppState>,
    Form(form): Form<HashForm>,
) -> Result<String, AppError> {
    let password = form
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::BadRequest("missing password".to_string()))?;
    let id = state.service.submit(password.into_bytes())?;
    Ok(id.to_string())
}

async fn get_hash(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, AppError> {
    let id: JobId = raw_id
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid job id: {raw_id}")))?;

    let response = match state.service.retrieve(id)? {
        JobStatus::Done { digest } => (StatusCode::OK, STANDARD.encode(digest)).into_response(),
        JobStatus::Pending => (StatusCode::ACCEPTED, "pending").into_response(),
        JobStatus::Failed { reason } => {
            (StatusCode::INTERNAL_SERVER_ERROR, reason).into_response()
        }
    };
    Ok(response)
}

async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.stats();
    Json(StatsResponse {
        total: stats.total,
        average: u64::try_from(stats.average_millis()).unwrap_or(u64::MAX),
    })
}

async fn shutdown(State(state): State<AppState>) -> &'static str {
    match state.service.request_shutdown().await {
        ShutdownOutcome::Initiated => "stopped",
        ShutdownOutcome::AlreadyRequested => "already stopped",
    }
}
