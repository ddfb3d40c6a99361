//! Prediction records
//!
//! The shape a persistence layer stores for a saved estimate: the request
//! fields verbatim, the result, the owning user and a creation timestamp.

use crate::types::{EstimationRequest, EstimationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRecord {
    pub user_id: String,
    #[serde(flatten)]
    pub request: EstimationRequest,
    pub predicted_yield: u64,
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl PredictionRecord {
    pub fn new(
        user_id: impl Into<String>,
        request: EstimationRequest,
        result: &EstimationResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            request,
            predicted_yield: result.predicted_yield,
            confidence: result.confidence_score,
            created_at,
        }
    }

    /// Record stamped with the current time
    pub fn now(user_id: impl Into<String>, request: EstimationRequest, result: &EstimationResult) -> Self {
        Self::new(user_id, request, result, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::YieldEstimator;
    use chrono::TimeZone;

    fn sample_record() -> PredictionRecord {
        let request = EstimationRequest::new("Corn", 6.5, 1000.0, 24.0, 150.0);
        let result = YieldEstimator::seeded(3).estimate(&request);
        let created_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        PredictionRecord::new("user-123", request, &result, created_at)
    }

    #[test]
    fn test_record_copies_result() {
        let record = sample_record();
        assert_eq!(record.user_id, "user-123");
        assert_eq!(record.predicted_yield, 10400);
        assert!(record.confidence >= 0.85 && record.confidence <= 0.98);
    }

    #[test]
    fn test_record_field_names_are_flat() {
        let json = serde_json::to_value(sample_record()).unwrap();

        assert_eq!(json["userId"], "user-123");
        assert_eq!(json["crop"], "Corn");
        assert_eq!(json["soilPH"], 6.5);
        assert_eq!(json["rainfallMm"], 1000.0);
        assert_eq!(json["predictedYield"], 10400);
        assert_eq!(json["createdAt"], "2026-03-14T09:30:00Z");
        assert!(json.get("request").is_none());
    }

    #[test]
    fn test_reads_dashboard_document() {
        let json = r#"{
            "userId": "u1",
            "crop": "Wheat",
            "soilPH": 6.1,
            "rainfall": 720,
            "temp": 19,
            "fertilizer": 110,
            "predictedYield": 2500,
            "confidence": 0.9,
            "createdAt": "2025-11-02T08:00:00Z"
        }"#;
        let record: PredictionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.request.crop, "Wheat");
        assert_eq!(record.request.rainfall_mm, 720.0);
        assert_eq!(record.request.temperature_c, 19.0);
        assert_eq!(record.predicted_yield, 2500);
    }
}
