//! Yield Estimator - heuristic crop yield prediction
//!
//! Combines the crop base yield, the four adjustment factors, the static
//! feature ranking and a random confidence draw into an [`EstimationResult`].
//! Includes both single-request and parallel (Rayon) batch paths.

use crate::confidence::draw_confidence;
use crate::factors::AdjustmentFactors;
use crate::importance::feature_importances;
use crate::types::{EstimationRequest, EstimationResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::{Mutex, PoisonError};

/// Deterministic part of an estimate: `max(0, round(base × factors))`.
///
/// NaN or negative products clamp to 0; huge products saturate at `u64::MAX`.
pub fn predict_yield(request: &EstimationRequest) -> u64 {
    let raw_yield = raw_yield(request);
    let rounded = raw_yield.round().max(0.0);
    // `as` saturates for floats and maps NaN to 0
    rounded as u64
}

/// Unrounded, unclamped yield in kg/ha
pub fn raw_yield(request: &EstimationRequest) -> f64 {
    AdjustmentFactors::from_request(request).apply(request.base_yield())
}

/// Estimate with a caller-supplied random source
pub fn estimate_with_rng<R: Rng + ?Sized>(
    request: &EstimationRequest,
    rng: &mut R,
) -> EstimationResult {
    build_result(request, draw_confidence(rng))
}

fn build_result(request: &EstimationRequest, confidence_score: f64) -> EstimationResult {
    let predicted_yield = predict_yield(request);

    tracing::debug!(
        crop = %request.crop,
        predicted_yield,
        confidence_score,
        "estimated yield"
    );

    EstimationResult {
        predicted_yield,
        confidence_score,
        feature_importances: feature_importances(),
    }
}

/// Estimate using the thread-local generator
pub fn estimate(request: &EstimationRequest) -> EstimationResult {
    estimate_with_rng(request, &mut rand::thread_rng())
}

/// Estimator service owning its random source.
///
/// Cheap to share behind an `Arc`; the internal lock only guards the
/// generator and is never held across the yield computation.
pub struct YieldEstimator {
    rng: Mutex<StdRng>,
}

impl YieldEstimator {
    /// Estimator seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible estimator: same seed, same sequence of confidence scores
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn next_confidence(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        draw_confidence(&mut *rng)
    }

    fn next_seed(&self) -> u64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen()
    }

    pub fn estimate(&self, request: &EstimationRequest) -> EstimationResult {
        build_result(request, self.next_confidence())
    }

    /// Estimate many requests in parallel.
    ///
    /// One base seed is drawn under the lock; item `i` then uses its own
    /// generator seeded with `base + i`, so a seeded estimator returns the
    /// same batch regardless of how Rayon schedules the work. Output order
    /// matches input order.
    pub fn estimate_batch(&self, requests: &[EstimationRequest]) -> Vec<EstimationResult> {
        let base_seed = self.next_seed();

        tracing::info!("Estimating batch of {} requests", requests.len());

        requests
            .par_iter()
            .enumerate()
            .map(|(i, request)| {
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
                estimate_with_rng(request, &mut rng)
            })
            .collect()
    }
}

impl Default for YieldEstimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Crop, Feature};

    #[test]
    fn test_base_yield_at_optimum() {
        for crop in Crop::ALL {
            let request = EstimationRequest::new(crop.label(), 6.5, 1000.0, 24.0, 0.0);
            assert_eq!(predict_yield(&request), crop.base_yield() as u64);
        }
    }

    #[test]
    fn test_soybean_scenario() {
        let request = EstimationRequest::new("Soybeans", 7.5, 1200.0, 20.0, 150.0);
        assert_eq!(predict_yield(&request), 3267);
    }

    #[test]
    fn test_unknown_crop_uses_default_base() {
        let request = EstimationRequest::new("Quinoa", 6.5, 1000.0, 24.0, 0.0);
        assert_eq!(predict_yield(&request), 4000);
    }

    #[test]
    fn test_negative_product_clamps_to_zero() {
        // pH 14 → factor -0.125
        let request = EstimationRequest::new("Corn", 14.0, 1000.0, 24.0, 0.0);
        assert!(raw_yield(&request) < 0.0);
        assert_eq!(predict_yield(&request), 0);
    }

    #[test]
    fn test_two_negative_factors_stay_positive() {
        // Both pH and temperature factors negative: product is positive again
        let request = EstimationRequest::new("Corn", 14.0, 1000.0, -20.0, 0.0);
        assert!(raw_yield(&request) > 0.0);
        assert!(predict_yield(&request) > 0);
    }

    #[test]
    fn test_nan_input_clamps_to_zero() {
        let request = EstimationRequest::new("Corn", f64::NAN, 1000.0, 24.0, 0.0);
        assert_eq!(predict_yield(&request), 0);
    }

    #[test]
    fn test_estimate_populates_all_fields() {
        let request = EstimationRequest::new("Wheat", 6.0, 900.0, 22.0, 100.0);
        let result = estimate(&request);

        assert_eq!(result.predicted_yield, predict_yield(&request));
        assert!(result.confidence_score >= 0.85 && result.confidence_score <= 0.98);
        assert_eq!(result.feature_importances.len(), 4);
        assert_eq!(result.feature_importances[0].feature, Feature::Rainfall);
    }

    #[test]
    fn test_seeded_estimators_agree() {
        let request = EstimationRequest::new("Rice", 6.8, 1100.0, 26.0, 90.0);
        let a = YieldEstimator::seeded(99);
        let b = YieldEstimator::seeded(99);

        for _ in 0..10 {
            assert_eq!(a.estimate(&request), b.estimate(&request));
        }
    }

    #[test]
    fn test_batch_preserves_order() {
        let requests: Vec<EstimationRequest> = Crop::ALL
            .iter()
            .map(|crop| EstimationRequest::new(crop.label(), 6.5, 1000.0, 24.0, 0.0))
            .collect();

        let results = YieldEstimator::seeded(5).estimate_batch(&requests);

        assert_eq!(results.len(), requests.len());
        for (crop, result) in Crop::ALL.iter().zip(&results) {
            assert_eq!(result.predicted_yield, crop.base_yield() as u64);
        }
    }

    #[test]
    fn test_seeded_batch_is_reproducible() {
        let requests: Vec<EstimationRequest> = (0..64)
            .map(|i| EstimationRequest::new("Corn", 6.0, 800.0 + i as f64, 23.0, 120.0))
            .collect();

        let first = YieldEstimator::seeded(2024).estimate_batch(&requests);
        let second = YieldEstimator::seeded(2024).estimate_batch(&requests);

        assert_eq!(first, second);
    }

    #[test]
    fn test_service_matches_free_function_with_same_seed() {
        let request = EstimationRequest::new("Cotton", 6.9, 950.0, 27.0, 60.0);
        let service = YieldEstimator::seeded(77);
        let mut rng = StdRng::seed_from_u64(77);

        for _ in 0..5 {
            assert_eq!(service.estimate(&request), estimate_with_rng(&request, &mut rng));
        }
    }

    #[test]
    fn test_empty_batch() {
        let results = YieldEstimator::seeded(1).estimate_batch(&[]);
        assert!(results.is_empty());
    }
}
