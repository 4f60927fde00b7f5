//! HTTP surface: `POST /predict`, `POST /features`, `GET /health`, `GET /`.

use crate::features::NamedFeature;
use crate::service::{ClassificationResult, ClassificationService, PredictRequest, ServiceError};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

const INDEX_HTML: &str = include_str!("../static/index.html");

pub struct AppState {
    pub service: ClassificationService,
    started_at: DateTime<Utc>,
    started: Instant,
}

impl AppState {
    pub fn new(service: ClassificationService) -> Self {
        Self {
            service,
            started_at: Utc::now(),
            started: Instant::now(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::ModelUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            // Vectors are well-formed by construction, so a failing model
            // call is attributed to the input.
            ServiceError::Classifier(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(status = status.as_u16(), error = %self, "request failed");
        } else {
            info!(status = status.as_u16(), error = %self, "request rejected");
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Debug, Serialize)]
struct FeaturesResponse {
    url: String,
    features: Vec<NamedFeature>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    model_loaded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model_sha256: Option<String>,
    started_at: String,
    uptime_seconds: u64,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .route("/features", post(features))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ClassificationResult>, ServiceError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("predict", %request_id);
    state
        .service
        .handle_predict(&body)
        .instrument(span)
        .await
        .map(Json)
}

async fn features(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<FeaturesResponse>, ServiceError> {
    let request = PredictRequest::from_body(&body)?;
    let request_id = Uuid::new_v4();
    let vector = state
        .service
        .features(&request.url)
        .instrument(info_span!("features", %request_id))
        .await;
    Ok(Json(FeaturesResponse {
        url: request.url,
        features: vector.named(),
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        model_loaded: state.service.classifier_loaded(),
        model_sha256: state.service.model_fingerprint().map(str::to_owned),
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: state.started.elapsed().as_secs(),
    })
}
