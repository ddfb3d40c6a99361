//! Synthetic demo data
//!
//! Generates plausible requests and saved predictions for seeding a demo
//! dashboard. Every generated record runs through the real estimator, so the
//! yields are consistent with the inputs.

use crate::estimator::YieldEstimator;
use crate::records::PredictionRecord;
use crate::types::{Crop, EstimationRequest};
use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Largest batch a single call may generate
pub const MAX_SYNTHETIC_COUNT: usize = 10_000;

/// Records are spread over this many days before `now`
pub const HISTORY_DAYS: i64 = 365;

#[derive(Debug, Error, PartialEq)]
pub enum SyntheticError {
    #[error("count must be between 1 and {max}, got {count}")]
    InvalidCount { count: usize, max: usize },

    #[error("invalid {field} range: [{min}, {max}]")]
    InvalidRange { field: &'static str, min: f64, max: f64 },

    #[error("at least one crop is required")]
    NoCrops,
}

/// Closed sampling ranges for each input
#[derive(Debug, Clone)]
pub struct SampleRanges {
    pub crops: Vec<String>,
    pub soil_ph: (f64, f64),
    pub rainfall_mm: (f64, f64),
    pub temperature_c: (f64, f64),
    pub fertilizer_kg_per_ha: (f64, f64),
}

impl Default for SampleRanges {
    /// Ranges used by the dashboard's demo predictions
    fn default() -> Self {
        Self {
            crops: Crop::ALL.iter().map(|c| c.label().to_string()).collect(),
            soil_ph: (5.5, 7.5),
            rainfall_mm: (600.0, 1400.0),
            temperature_c: (15.0, 30.0),
            fertilizer_kg_per_ha: (100.0, 200.0),
        }
    }
}

impl SampleRanges {
    pub fn validate(&self) -> Result<(), SyntheticError> {
        if self.crops.is_empty() {
            return Err(SyntheticError::NoCrops);
        }

        let ranges = [
            ("soil_ph", self.soil_ph),
            ("rainfall_mm", self.rainfall_mm),
            ("temperature_c", self.temperature_c),
            ("fertilizer_kg_per_ha", self.fertilizer_kg_per_ha),
        ];
        for (field, (min, max)) in ranges {
            // Negated comparison also rejects NaN bounds; the width must be
            // finite for the uniform sampler
            if !(min <= max) || !min.is_finite() || !max.is_finite() || !(max - min).is_finite() {
                return Err(SyntheticError::InvalidRange { field, min, max });
            }
        }
        Ok(())
    }
}

fn validate_count(count: usize) -> Result<(), SyntheticError> {
    if count == 0 || count > MAX_SYNTHETIC_COUNT {
        return Err(SyntheticError::InvalidCount {
            count,
            max: MAX_SYNTHETIC_COUNT,
        });
    }
    Ok(())
}

/// Uniform draw in [min, max]; a degenerate range returns min
fn sample<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    if min == max {
        min
    } else {
        rng.gen_range(min..=max)
    }
}

/// pH at one decimal, the rest as whole numbers (matches form inputs)
fn sample_request<R: Rng + ?Sized>(rng: &mut R, ranges: &SampleRanges) -> EstimationRequest {
    let crop = ranges
        .crops
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| Crop::Corn.label().to_string());

    EstimationRequest {
        crop,
        soil_ph: (sample(rng, ranges.soil_ph) * 10.0).round() / 10.0,
        rainfall_mm: sample(rng, ranges.rainfall_mm).round(),
        temperature_c: sample(rng, ranges.temperature_c).round(),
        fertilizer_kg_per_ha: sample(rng, ranges.fertilizer_kg_per_ha).round(),
    }
}

/// Generate `count` random requests within `ranges`
pub fn generate_requests<R: Rng + ?Sized>(
    count: usize,
    ranges: &SampleRanges,
    rng: &mut R,
) -> Result<Vec<EstimationRequest>, SyntheticError> {
    validate_count(count)?;
    ranges.validate()?;

    Ok((0..count).map(|_| sample_request(rng, ranges)).collect())
}

/// Generate `count` saved predictions for `user_id`, dated within the year before `now`
pub fn generate_records<R: Rng + ?Sized>(
    count: usize,
    user_id: &str,
    now: DateTime<Utc>,
    ranges: &SampleRanges,
    estimator: &YieldEstimator,
    rng: &mut R,
) -> Result<Vec<PredictionRecord>, SyntheticError> {
    let requests = generate_requests(count, ranges, rng)?;
    let results = estimator.estimate_batch(&requests);
    let history_secs = HISTORY_DAYS * 24 * 60 * 60;

    let records: Vec<PredictionRecord> = requests
        .into_iter()
        .zip(results.iter())
        .map(|(request, result)| {
            let age = Duration::seconds(rng.gen_range(0..history_secs));
            PredictionRecord::new(user_id, request, result, now - age)
        })
        .collect();

    tracing::info!("Generated {} synthetic records for {}", records.len(), user_id);
    Ok(records)
}
