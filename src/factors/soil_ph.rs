//! FACTOR: SOIL pH
//!
//! Linear penalty for distance from neutral-leaning soil. Each pH unit away
//! from 6.5 removes 15% of the yield, in either direction.

/// pH at which the factor is exactly 1.0
pub const OPTIMAL_PH: f64 = 6.5;

/// Yield fraction lost per pH unit of deviation
pub const PH_SENSITIVITY: f64 = 0.15;

/// Calculate the soil pH adjustment factor
///
/// Not clamped: pH below ~-0.2 or above ~13.2 gives a negative factor.
pub fn calculate_ph_factor(soil_ph: f64) -> f64 {
    1.0 - (soil_ph - OPTIMAL_PH).abs() * PH_SENSITIVITY
}
