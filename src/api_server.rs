// Axum API Server Module
//
// Purpose: REST API around the yield estimator, explanation engine and
// synthetic demo data. CPU-bound batch work runs on the blocking pool.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::estimator::YieldEstimator;
use crate::explanation::{explain, YieldExplanation};
use crate::records::PredictionRecord;
use crate::stats::{dashboard_stats, DashboardStats};
use crate::synthetic::{generate_records, SampleRanges, SyntheticError};
use crate::types::{Crop, EstimationRequest, EstimationResult, DEFAULT_BASE_YIELD};

/// Largest batch accepted by `/api/predict/batch`
pub const MAX_BATCH_SIZE: usize = 10_000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<YieldEstimator>,
}

impl AppState {
    /// State with an entropy-seeded estimator, or a reproducible one when `seed` is set
    pub fn new(seed: Option<u64>) -> Self {
        let estimator = match seed {
            Some(seed) => {
                tracing::info!("Using seeded estimator (seed {})", seed);
                YieldEstimator::seeded(seed)
            }
            None => YieldEstimator::new(),
        };

        Self {
            estimator: Arc::new(estimator),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Reference data
        .route("/api/crops", get(list_crops))

        // Estimation endpoints
        .route("/api/predict", post(predict))
        .route("/api/predict/explain", post(predict_with_explanation))
        .route("/api/predict/batch", post(predict_batch))

        // Demo data
        .route("/api/synthetic", post(synthetic_records))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new()) // gzip + brotli compression
        .layer(CorsLayer::permissive()) // Allow all origins (adjust for production)
        .layer(TraceLayer::new_for_http()) // Request logging
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339()
    }))
}

async fn list_crops() -> Json<CropsResponse> {
    let crops = Crop::ALL
        .iter()
        .map(|crop| CropEntry {
            crop: crop.label().to_string(),
            base_yield: crop.base_yield(),
        })
        .collect();

    Json(CropsResponse {
        crops,
        default_base_yield: DEFAULT_BASE_YIELD,
    })
}

async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<EstimationRequest>,
) -> Json<EstimationResult> {
    Json(state.estimator.estimate(&payload))
}

async fn predict_with_explanation(
    State(state): State<AppState>,
    Json(payload): Json<EstimationRequest>,
) -> Json<ExplainResponse> {
    let result = state.estimator.estimate(&payload);
    let explanation = explain(&payload);

    Json(ExplainResponse { result, explanation })
}

async fn predict_batch(
    State(state): State<AppState>,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchResponse>, AppError> {
    let batch_size = payload.requests.len();
    if batch_size > MAX_BATCH_SIZE {
        return Err(AppError::BadRequest(format!(
            "batch of {} exceeds the limit of {}",
            batch_size, MAX_BATCH_SIZE
        )));
    }

    tracing::info!("Scoring batch of {} requests", batch_size);

    // CPU-bound work: run in blocking thread pool
    let estimator = state.estimator.clone();
    let results = tokio::task::spawn_blocking(move || estimator.estimate_batch(&payload.requests))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(BatchResponse {
        count: results.len(),
        results,
    }))
}

async fn synthetic_records(
    State(state): State<AppState>,
    Json(payload): Json<SyntheticRequest>,
) -> Result<Json<SyntheticResponse>, AppError> {
    let count = payload.count;
    let user_id = payload.user_id;
    let seed = payload.seed;

    tracing::info!("Generating {} synthetic records (seed {:?})", count, seed);

    let shared = state.estimator.clone();
    let (records, stats) = tokio::task::spawn_blocking(move || -> Result<_, AppError> {
        let ranges = SampleRanges::default();
        let now = Utc::now();

        let records = match seed {
            Some(seed) => {
                let estimator = YieldEstimator::seeded(seed);
                let mut rng = StdRng::seed_from_u64(seed);
                generate_records(count, &user_id, now, &ranges, &estimator, &mut rng)?
            }
            None => {
                let mut rng = StdRng::from_entropy();
                generate_records(count, &user_id, now, &ranges, &shared, &mut rng)?
            }
        };

        let stats = dashboard_stats(&records)
            .map_err(|e| AppError::Internal(format!("Statistics error: {}", e)))?;

        Ok((records, stats))
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(Json(SyntheticResponse { records, stats }))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CropEntry {
    crop: String,
    base_yield: f64,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CropsResponse {
    crops: Vec<CropEntry>,
    default_base_yield: f64,
}

#[derive(Serialize)]
struct ExplainResponse {
    result: EstimationResult,
    explanation: YieldExplanation,
}

#[derive(Deserialize, Debug)]
struct BatchRequest {
    requests: Vec<EstimationRequest>,
}

#[derive(Serialize)]
struct BatchResponse {
    count: usize,
    results: Vec<EstimationResult>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct SyntheticRequest {
    #[serde(default = "default_synthetic_count")]
    count: usize,
    seed: Option<u64>,
    #[serde(default = "default_user_id")]
    user_id: String,
}

fn default_synthetic_count() -> usize {
    500
}

fn default_user_id() -> String {
    "demo".to_string()
}

#[derive(Serialize)]
struct SyntheticResponse {
    records: Vec<PredictionRecord>,
    stats: DashboardStats,
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl From<SyntheticError> for AppError {
    fn from(err: SyntheticError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(serde_json::json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
