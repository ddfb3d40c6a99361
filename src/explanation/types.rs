use serde::{Deserialize, Serialize};
use crate::factors::AdjustmentFactors;
use crate::types::Feature;

/// Complete explanation for one estimate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldExplanation {
    pub crop: String,
    pub recognized_crop: bool,
    pub base_yield: f64,
    pub predicted_yield: u64,
    pub adjustment: AdjustmentFactors,
    pub factors: Vec<FactorCard>,
    pub benefits: Vec<BenefitCard>,
    pub warnings: Vec<WarningCard>,
    /// Environmental factor costing the most yield, if any is off-optimum
    pub limiting_factor: Option<Feature>,
    pub recommendation: String,
}

/// Per-feature breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorCard {
    pub feature: Feature,
    pub input: f64,
    pub optimum: Option<f64>,
    pub factor: f64,
    pub impact_pct: f64, // (factor - 1) × 100, negative = yield lost
    pub severity: Severity,
}

/// Benefit card for a factor at or above its optimum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenefitCard {
    pub benefit_type: String, // "soil_ph_optimal", "fertilizer_boost", etc.
    pub feature: Feature,
    pub title: String,
    pub message: String,
    pub detail: String,
}

/// Warning card for a factor costing yield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningCard {
    pub warning_type: String, // "soil_ph_acidic", "rainfall_deficit", "unknown_crop"
    pub feature: Option<Feature>,
    pub severity: Severity,
    pub icon: String, // "ℹ️", "⚠️", "⚡", "🚨"
    pub message: String,
    pub detail: String,
    pub advice: String,
}

/// Severity level for warnings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    None,
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Derive severity from an adjustment factor (1.0 = optimum)
    pub fn from_factor(factor: f64) -> Self {
        match factor {
            f if f >= 0.95 => Severity::None,
            f if f >= 0.85 => Severity::Low,
            f if f >= 0.70 => Severity::Medium,
            _ => Severity::High,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Severity::None => "",
            Severity::Info => "ℹ️",
            Severity::Low => "⚠️",
            Severity::Medium => "⚡",
            Severity::High => "🚨",
        }
    }
}

/// Fragment of explanation from a single factor
#[derive(Debug, Clone)]
pub struct FactorFragment {
    pub card: FactorCard,
    pub benefit: Option<BenefitCard>,
    pub warning: Option<WarningCard>,
}

impl FactorFragment {
    pub fn with_benefit(card: FactorCard, benefit: BenefitCard) -> Self {
        Self {
            card,
            benefit: Some(benefit),
            warning: None,
        }
    }

    pub fn with_warning(card: FactorCard, warning: WarningCard) -> Self {
        Self {
            card,
            benefit: None,
            warning: Some(warning),
        }
    }

    /// Card only, nothing worth calling out
    pub fn neutral(card: FactorCard) -> Self {
        Self {
            card,
            benefit: None,
            warning: None,
        }
    }
}
