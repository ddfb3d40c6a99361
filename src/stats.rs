//! Dashboard statistics over saved predictions
//!
//! Builds a Polars DataFrame from the records and aggregates per crop with a
//! lazy group-by. Feeds the "average yield" and per-crop dashboard cards.

use crate::records::PredictionRecord;
use anyhow::{Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-crop aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSummary {
    pub crop: String,
    pub predictions: u32,
    pub mean_yield: f64,
    pub max_yield: f64,
    pub mean_confidence: f64,
}

/// Totals plus per-crop breakdown, crops sorted by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_predictions: usize,
    pub mean_yield: Option<f64>,
    pub mean_confidence: Option<f64>,
    pub by_crop: Vec<CropSummary>,
}

impl DashboardStats {
    fn empty() -> Self {
        Self {
            total_predictions: 0,
            mean_yield: None,
            mean_confidence: None,
            by_crop: Vec::new(),
        }
    }
}

/// Convert records to a DataFrame (crop, predicted_yield, confidence)
pub fn records_to_frame(records: &[PredictionRecord]) -> Result<DataFrame> {
    let crops: Vec<&str> = records.iter().map(|r| r.request.crop.as_str()).collect();
    let yields: Vec<f64> = records.iter().map(|r| r.predicted_yield as f64).collect();
    let confidences: Vec<f64> = records.iter().map(|r| r.confidence).collect();

    let df = df! {
        "crop" => crops,
        "predicted_yield" => yields,
        "confidence" => confidences
    }
    .context("Failed to build prediction frame")?;

    Ok(df)
}

/// Aggregate saved predictions for the dashboard
pub fn dashboard_stats(records: &[PredictionRecord]) -> Result<DashboardStats> {
    if records.is_empty() {
        return Ok(DashboardStats::empty());
    }

    let df = records_to_frame(records)?;

    let mean_yield = df.column("predicted_yield")?.f64()?.mean();
    let mean_confidence = df.column("confidence")?.f64()?.mean();

    let summary = df
        .lazy()
        .group_by([col("crop")])
        .agg([
            col("predicted_yield").count().cast(DataType::UInt32).alias("predictions"),
            col("predicted_yield").mean().alias("mean_yield"),
            col("predicted_yield").max().alias("max_yield"),
            col("confidence").mean().alias("mean_confidence"),
        ])
        .sort(["crop"], SortMultipleOptions::default())
        .collect()
        .context("Failed to aggregate predictions by crop")?;

    let crop_col = summary.column("crop")?.str()?;
    let count_col = summary.column("predictions")?.u32()?;
    let mean_col = summary.column("mean_yield")?.f64()?;
    let max_col = summary.column("max_yield")?.f64()?;
    let confidence_col = summary.column("mean_confidence")?.f64()?;

    let by_crop = (0..summary.height())
        .map(|i| CropSummary {
            crop: crop_col.get(i).unwrap_or_default().to_string(),
            predictions: count_col.get(i).unwrap_or(0),
            mean_yield: mean_col.get(i).unwrap_or(0.0),
            max_yield: max_col.get(i).unwrap_or(0.0),
            mean_confidence: confidence_col.get(i).unwrap_or(0.0),
        })
        .collect();

    tracing::debug!("Aggregated {} records into {} crops", records.len(), summary.height());

    Ok(DashboardStats {
        total_predictions: records.len(),
        mean_yield,
        mean_confidence,
        by_crop,
    })
}
