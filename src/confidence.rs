//! Confidence score sampling
//!
//! The score is a random draw, not a measure of input plausibility. Callers
//! supply the generator so tests and seeded services stay reproducible.

use rand::Rng;

/// Lower bound of the confidence range (inclusive)
pub const CONFIDENCE_FLOOR: f64 = 0.85;

/// Width of the random spread above the floor
pub const CONFIDENCE_SPREAD: f64 = 0.1;

/// Hard ceiling applied after the draw
pub const CONFIDENCE_CEILING: f64 = 0.98;

/// Draw a confidence score: `min(0.98, 0.85 + U[0,1) × 0.1)`
pub fn draw_confidence<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    (CONFIDENCE_FLOOR + u * CONFIDENCE_SPREAD).min(CONFIDENCE_CEILING)
}
