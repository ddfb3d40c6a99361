//! FACTOR: FERTILIZER
//!
//! Unbounded linear boost: every 200 kg/ha adds 40%. There is no
//! diminishing-returns term, so very high rates keep increasing the yield.

/// Application rate (kg/ha) that yields the full [`FERTILIZER_GAIN`]
pub const FERTILIZER_REFERENCE_KG_PER_HA: f64 = 200.0;

/// Yield fraction gained per reference application
pub const FERTILIZER_GAIN: f64 = 0.4;

/// Calculate the fertilizer adjustment factor
///
/// Zero fertilizer is neutral; negative rates shrink the factor below 1.
pub fn calculate_fertilizer_factor(fertilizer_kg_per_ha: f64) -> f64 {
    1.0 + (fertilizer_kg_per_ha / FERTILIZER_REFERENCE_KG_PER_HA) * FERTILIZER_GAIN
}
