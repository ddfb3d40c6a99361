//! FACTOR: TEMPERATURE
//!
//! Mean growing-season temperature, optimum 24 °C, 3% per degree either way.

/// Temperature (°C) at which the factor is exactly 1.0
pub const OPTIMAL_TEMPERATURE_C: f64 = 24.0;

/// Yield fraction lost per degree of deviation
pub const TEMPERATURE_SENSITIVITY: f64 = 0.03;

/// Calculate the temperature adjustment factor
pub fn calculate_temp_factor(temperature_c: f64) -> f64 {
    1.0 - (temperature_c - OPTIMAL_TEMPERATURE_C).abs() * TEMPERATURE_SENSITIVITY
}
