//! Estimator Property Tests
//!
//! Checks the documented behaviour of the public estimation API end to end:
//! base yields at the optimum, clamping, crop fallback, importance ranking,
//! confidence bounds and determinism.

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use yield_estimator::{
    estimate, estimate_with_rng, explain, predict_yield, Crop, EstimationRequest, Feature,
    YieldEstimator, DEFAULT_BASE_YIELD,
};

fn optimal(crop: &str) -> EstimationRequest {
    EstimationRequest::new(crop, 6.5, 1000.0, 24.0, 0.0)
}

#[test]
fn test_every_crop_hits_base_yield_at_optimum() {
    let expected = [
        ("Corn", 8000),
        ("Soybeans", 3500),
        ("Wheat", 3000),
        ("Rice", 5000),
        ("Cotton", 2000),
    ];

    for (crop, base) in expected {
        let result = estimate(&optimal(crop));
        assert_eq!(result.predicted_yield, base, "{}", crop);
    }
}

#[test]
fn test_soybean_example() {
    let request = EstimationRequest::new("Soybeans", 7.5, 1200.0, 20.0, 150.0);
    let explanation = explain(&request);

    assert_relative_eq!(explanation.adjustment.soil_ph, 0.85, epsilon = 1e-9);
    assert_relative_eq!(explanation.adjustment.rainfall, 0.96, epsilon = 1e-9);
    assert_relative_eq!(explanation.adjustment.temperature, 0.88, epsilon = 1e-9);
    assert_relative_eq!(explanation.adjustment.fertilizer, 1.3, epsilon = 1e-9);
    assert_eq!(predict_yield(&request), 3267);
}

#[test]
fn test_unrecognised_crops_use_default_base() {
    for crop in ["Quinoa", "corn", "", " Corn"] {
        assert!(Crop::from_label(crop).is_none());
        assert_eq!(predict_yield(&optimal(crop)), DEFAULT_BASE_YIELD as u64);
    }
}

#[test]
fn test_yield_never_negative_for_extreme_inputs() {
    let extremes = [0.0, -1.0e6, 1.0e6, f64::MAX, f64::MIN, f64::NAN, f64::INFINITY];

    for &x in &extremes {
        for request in [
            EstimationRequest::new("Corn", x, 1000.0, 24.0, 0.0),
            EstimationRequest::new("Corn", 6.5, x, 24.0, 0.0),
            EstimationRequest::new("Corn", 6.5, 1000.0, x, 0.0),
            EstimationRequest::new("Corn", 6.5, 1000.0, 24.0, x),
        ] {
            // u64 cannot be negative; this also checks nothing panics
            let result = estimate(&request);
            assert_eq!(result.predicted_yield, predict_yield(&request));
        }
    }

    let ruined = EstimationRequest::new("Wheat", 14.0, 1000.0, 24.0, 0.0);
    assert_eq!(predict_yield(&ruined), 0);
}

#[test]
fn test_importances_are_fixed_and_normalised() {
    let result = estimate(&EstimationRequest::new("Rice", 5.9, 640.0, 31.0, 75.0));

    let order: Vec<Feature> = result.feature_importances.iter().map(|fi| fi.feature).collect();
    assert_eq!(
        order,
        vec![Feature::Rainfall, Feature::SoilPH, Feature::Fertilizer, Feature::Temperature]
    );

    let total: f64 = result.feature_importances.iter().map(|fi| fi.weight).sum();
    assert_relative_eq!(total, 1.0, epsilon = 1e-9);

    let weights: Vec<f64> = result.feature_importances.iter().map(|fi| fi.weight).collect();
    assert!(weights.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_confidence_bounds_over_many_draws() {
    let mut rng = StdRng::seed_from_u64(7);
    let request = optimal("Cotton");

    for _ in 0..10_000 {
        let result = estimate_with_rng(&request, &mut rng);
        assert!(result.confidence_score >= 0.85);
        assert!(result.confidence_score <= 0.98);
    }
}

#[test]
fn test_identical_inputs_are_deterministic_apart_from_confidence() {
    let request = EstimationRequest::new("Wheat", 6.1, 870.0, 19.0, 130.0);

    let a = estimate(&request);
    let b = estimate(&request);

    assert_eq!(a.predicted_yield, b.predicted_yield);
    assert_eq!(a.feature_importances, b.feature_importances);
}

#[test]
fn test_seeded_service_matches_across_instances() {
    let requests: Vec<EstimationRequest> = Crop::ALL.iter().map(|c| optimal(c.label())).collect();

    let first = YieldEstimator::seeded(314);
    let second = YieldEstimator::seeded(314);

    for request in &requests {
        assert_eq!(first.estimate(request), second.estimate(request));
    }
    assert_eq!(first.estimate_batch(&requests), second.estimate_batch(&requests));
}

#[test]
fn test_request_deserializes_from_form_payload() {
    let request: EstimationRequest = serde_json::from_str(
        r#"{"crop":"Corn","soilPH":6.5,"rainfall":1000,"temp":24,"fertilizer":0}"#,
    )
    .unwrap();

    assert_eq!(predict_yield(&request), 8000);
}
