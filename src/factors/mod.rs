//! Adjustment factor modules for yield estimation
//!
//! Each factor is a multiplier derived from the distance of one input from
//! its agronomic optimum. Factors are not clamped; only the final
//! yield is floored at zero.

pub mod soil_ph;
pub mod rainfall;
pub mod temperature;
pub mod fertilizer;

pub use soil_ph::{calculate_ph_factor, OPTIMAL_PH};
pub use rainfall::{calculate_rain_factor, OPTIMAL_RAINFALL_MM};
pub use temperature::{calculate_temp_factor, OPTIMAL_TEMPERATURE_C};
pub use fertilizer::calculate_fertilizer_factor;

use crate::types::{EstimationRequest, Feature};
use serde::{Deserialize, Serialize};

/// All four factors for one request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentFactors {
    pub soil_ph: f64,
    pub rainfall: f64,
    pub temperature: f64,
    pub fertilizer: f64,
}

impl AdjustmentFactors {
    pub fn from_request(request: &EstimationRequest) -> Self {
        Self {
            soil_ph: calculate_ph_factor(request.soil_ph),
            rainfall: calculate_rain_factor(request.rainfall_mm),
            temperature: calculate_temp_factor(request.temperature_c),
            fertilizer: calculate_fertilizer_factor(request.fertilizer_kg_per_ha),
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SoilPH => self.soil_ph,
            Feature::Rainfall => self.rainfall,
            Feature::Temperature => self.temperature,
            Feature::Fertilizer => self.fertilizer,
        }
    }

    /// Apply all factors to a base yield, multiplying in the order
    /// pH, rain, temp, fertilizer.
    pub fn apply(&self, base_yield: f64) -> f64 {
        base_yield * self.soil_ph * self.rainfall * self.temperature * self.fertilizer
    }
}

/// Raw input value behind a feature
pub fn feature_input(request: &EstimationRequest, feature: Feature) -> f64 {
    match feature {
        Feature::SoilPH => request.soil_ph,
        Feature::Rainfall => request.rainfall_mm,
        Feature::Temperature => request.temperature_c,
        Feature::Fertilizer => request.fertilizer_kg_per_ha,
    }
}

/// Agronomic optimum for a feature (fertilizer has none)
pub fn feature_optimum(feature: Feature) -> Option<f64> {
    match feature {
        Feature::SoilPH => Some(OPTIMAL_PH),
        Feature::Rainfall => Some(OPTIMAL_RAINFALL_MM),
        Feature::Temperature => Some(OPTIMAL_TEMPERATURE_C),
        Feature::Fertilizer => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_optimal_request_is_neutral() {
        let request = EstimationRequest::new("Corn", 6.5, 1000.0, 24.0, 0.0);
        let factors = AdjustmentFactors::from_request(&request);

        for feature in Feature::ALL {
            assert_eq!(factors.get(feature), 1.0);
        }
        assert_eq!(factors.apply(8000.0), 8000.0);
    }

    #[test]
    fn test_soybean_scenario_factors() {
        let request = EstimationRequest::new("Soybeans", 7.5, 1200.0, 20.0, 150.0);
        let factors = AdjustmentFactors::from_request(&request);

        assert_relative_eq!(factors.soil_ph, 0.85, epsilon = 1e-12);
        assert_relative_eq!(factors.rainfall, 0.96, epsilon = 1e-12);
        assert_relative_eq!(factors.temperature, 0.88, epsilon = 1e-12);
        assert_relative_eq!(factors.fertilizer, 1.3, epsilon = 1e-12);

        // 3500 × 0.85 × 0.96 × 0.88 × 1.3 = 3267.264
        assert_relative_eq!(factors.apply(3500.0), 3267.264, epsilon = 1e-6);
    }

    #[test]
    fn test_feature_input_and_optimum() {
        let request = EstimationRequest::new("Rice", 5.0, 1500.0, 30.0, 80.0);

        assert_eq!(feature_input(&request, Feature::Rainfall), 1500.0);
        assert_eq!(feature_input(&request, Feature::Fertilizer), 80.0);
        assert_eq!(feature_optimum(Feature::Temperature), Some(24.0));
        assert_eq!(feature_optimum(Feature::Fertilizer), None);
    }
}
