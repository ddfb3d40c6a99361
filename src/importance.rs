//! Feature importance ranking
//!
//! The weights are fixed display values, not learned from data. They never
//! depend on the request.

use crate::types::{Feature, FeatureImportance};

/// Declared weights, in declaration order
pub const FEATURE_WEIGHTS: [(Feature, f64); 4] = [
    (Feature::SoilPH, 0.25),
    (Feature::Rainfall, 0.35),
    (Feature::Temperature, 0.15),
    (Feature::Fertilizer, 0.25),
];

/// Feature importances sorted by descending weight.
///
/// The sort is stable, so the SoilPH/Fertilizer tie keeps declaration order:
/// Rainfall, SoilPH, Fertilizer, Temperature.
pub fn feature_importances() -> Vec<FeatureImportance> {
    let mut importances: Vec<FeatureImportance> = FEATURE_WEIGHTS
        .iter()
        .map(|&(feature, weight)| FeatureImportance { feature, weight })
        .collect();

    importances.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    importances
}

/// Weight for a single feature
pub fn weight_of(feature: Feature) -> f64 {
    FEATURE_WEIGHTS
        .iter()
        .find(|(f, _)| *f == feature)
        .map(|&(_, w)| w)
        .unwrap_or(0.0)
}
