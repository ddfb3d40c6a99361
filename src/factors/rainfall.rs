//! FACTOR: RAINFALL
//!
//! Seasonal rainfall penalty centred on 1000 mm. 500 mm off the optimum
//! (drought or waterlogging) costs 10%.

/// Rainfall (mm) at which the factor is exactly 1.0
pub const OPTIMAL_RAINFALL_MM: f64 = 1000.0;

/// Yield fraction lost per mm of deviation
pub const RAINFALL_SENSITIVITY: f64 = 0.0002;

/// Calculate the rainfall adjustment factor
pub fn calculate_rain_factor(rainfall_mm: f64) -> f64 {
    1.0 - (rainfall_mm - OPTIMAL_RAINFALL_MM).abs() * RAINFALL_SENSITIVITY
}
