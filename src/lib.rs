//! Yield Estimator
//!
//! Heuristic crop yield prediction for the farm dashboard.
//!
//! - `factors/`: one adjustment factor per environmental input
//! - `estimator`: base yield × factors, importance ranking, confidence draw
//! - `explanation/`: benefit/warning cards and a recommendation per estimate
//! - `records`, `synthetic`, `stats`: saved predictions, demo data, dashboard aggregates
//! - `config`: server settings from environment variables
//! - `api_server` (feature `api`): Axum REST surface

pub mod types;
pub mod factors;
pub mod importance;
pub mod confidence;
pub mod estimator;
pub mod explanation;
pub mod records;
pub mod synthetic;
pub mod stats;
pub mod config;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use types::{Crop, EstimationRequest, EstimationResult, Feature, FeatureImportance, DEFAULT_BASE_YIELD};
pub use estimator::{estimate, estimate_with_rng, predict_yield, YieldEstimator};
pub use explanation::{explain, YieldExplanation};
pub use records::PredictionRecord;
pub use stats::{dashboard_stats, CropSummary, DashboardStats};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
