//! Request and result types for yield estimation
//!
//! Field names on the wire follow the dashboard form (`soilPH`, `rainfallMm`, ...),
//! so a serialized result can be stored next to its request without renaming.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base yield (kg/ha) used when the crop label is not in the table
pub const DEFAULT_BASE_YIELD: f64 = 4000.0;

/// Crops with a known base yield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Crop {
    Corn,
    Soybeans,
    Wheat,
    Rice,
    Cotton,
}

impl Crop {
    pub const ALL: [Crop; 5] = [
        Crop::Corn,
        Crop::Soybeans,
        Crop::Wheat,
        Crop::Rice,
        Crop::Cotton,
    ];

    /// Exact, case-sensitive label lookup ("Corn", not "corn")
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|crop| crop.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Crop::Corn => "Corn",
            Crop::Soybeans => "Soybeans",
            Crop::Wheat => "Wheat",
            Crop::Rice => "Rice",
            Crop::Cotton => "Cotton",
        }
    }

    /// Reference yield in kg/ha before environmental adjustment
    pub fn base_yield(&self) -> f64 {
        match self {
            Crop::Corn => 8000.0,
            Crop::Soybeans => 3500.0,
            Crop::Wheat => 3000.0,
            Crop::Rice => 5000.0,
            Crop::Cotton => 2000.0,
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base yield for an arbitrary label, falling back to [`DEFAULT_BASE_YIELD`]
pub fn base_yield_for(label: &str) -> f64 {
    Crop::from_label(label)
        .map(|crop| crop.base_yield())
        .unwrap_or(DEFAULT_BASE_YIELD)
}

/// Environmental inputs for a single estimate.
///
/// Values are not validated. Anything numeric is accepted and simply
/// extrapolated by the factor formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub crop: String,
    #[serde(rename = "soilPH")]
    pub soil_ph: f64,
    #[serde(rename = "rainfallMm", alias = "rainfall")]
    pub rainfall_mm: f64,
    #[serde(rename = "temperatureC", alias = "temp")]
    pub temperature_c: f64,
    #[serde(rename = "fertilizerKgPerHa", alias = "fertilizer")]
    pub fertilizer_kg_per_ha: f64,
}

impl EstimationRequest {
    pub fn new(
        crop: impl Into<String>,
        soil_ph: f64,
        rainfall_mm: f64,
        temperature_c: f64,
        fertilizer_kg_per_ha: f64,
    ) -> Self {
        Self {
            crop: crop.into(),
            soil_ph,
            rainfall_mm,
            temperature_c,
            fertilizer_kg_per_ha,
        }
    }

    /// Recognised crop, if the label is in the table
    pub fn known_crop(&self) -> Option<Crop> {
        Crop::from_label(&self.crop)
    }

    pub fn base_yield(&self) -> f64 {
        base_yield_for(&self.crop)
    }
}

/// Named input feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    #[serde(rename = "Soil pH")]
    SoilPH,
    Rainfall,
    Temperature,
    Fertilizer,
}

impl Feature {
    /// Declaration order; also the tie-break order for equal weights
    pub const ALL: [Feature; 4] = [
        Feature::SoilPH,
        Feature::Rainfall,
        Feature::Temperature,
        Feature::Fertilizer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Feature::SoilPH => "Soil pH",
            Feature::Rainfall => "Rainfall",
            Feature::Temperature => "Temperature",
            Feature::Fertilizer => "Fertilizer",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: Feature,
    pub weight: f64,
}

/// Output of a single estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// kg/ha, rounded and floored at zero
    pub predicted_yield: u64,
    /// In [0.85, 0.98), unrelated to the inputs
    pub confidence_score: f64,
    /// Sorted by descending weight
    pub feature_importances: Vec<FeatureImportance>,
}
