use crate::estimator::predict_yield;
use crate::explanation::fragments::{corrective_advice, generate_factor_fragment};
use crate::explanation::types::{Severity, WarningCard, YieldExplanation};
use crate::factors::AdjustmentFactors;
use crate::types::{EstimationRequest, Feature, DEFAULT_BASE_YIELD};

/// Factors at or above this value do not count as limiting
const LIMITING_THRESHOLD: f64 = 0.95;

/// Environmental features that can limit yield (fertilizer only adds)
const ENVIRONMENTAL: [Feature; 3] = [Feature::SoilPH, Feature::Rainfall, Feature::Temperature];

/// Explanation generator
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Generate a complete explanation for one request
    pub fn generate(request: &EstimationRequest) -> YieldExplanation {
        let factors = AdjustmentFactors::from_request(request);
        let recognized_crop = request.known_crop().is_some();

        let mut cards = Vec::with_capacity(Feature::ALL.len());
        let mut benefits = Vec::new();
        let mut warnings = Vec::new();

        if !recognized_crop {
            warnings.push(WarningCard {
                warning_type: "unknown_crop".to_string(),
                feature: None,
                severity: Severity::Info,
                icon: Severity::Info.icon().to_string(),
                message: format!("No base yield on record for '{}'", request.crop),
                detail: format!("Using the default base yield of {:.0} kg/ha", DEFAULT_BASE_YIELD),
                advice: "Pick Corn, Soybeans, Wheat, Rice or Cotton for a crop-specific baseline".to_string(),
            });
        }

        for feature in Feature::ALL {
            let fragment = generate_factor_fragment(request, &factors, feature);
            if let Some(benefit) = fragment.benefit {
                benefits.push(benefit);
            }
            if let Some(warning) = fragment.warning {
                warnings.push(warning);
            }
            cards.push(fragment.card);
        }

        let limiting_factor = limiting_factor(&factors);
        let recommendation = recommendation(request, &factors, limiting_factor);

        tracing::debug!(
            crop = %request.crop,
            warnings = warnings.len(),
            limiting = ?limiting_factor,
            "generated explanation"
        );

        YieldExplanation {
            crop: request.crop.clone(),
            recognized_crop,
            base_yield: request.base_yield(),
            predicted_yield: predict_yield(request),
            adjustment: factors,
            factors: cards,
            benefits,
            warnings,
            limiting_factor,
            recommendation,
        }
    }
}

/// Shorthand for [`ExplanationGenerator::generate`]
pub fn explain(request: &EstimationRequest) -> YieldExplanation {
    ExplanationGenerator::generate(request)
}

/// Lowest environmental factor below the threshold; ties keep declared order
fn limiting_factor(factors: &AdjustmentFactors) -> Option<Feature> {
    let mut worst: Option<(Feature, f64)> = None;
    for feature in ENVIRONMENTAL {
        let value = factors.get(feature);
        // NaN never compares below, so treat it as the worst possible value
        let value = if value.is_nan() { f64::NEG_INFINITY } else { value };
        if value >= LIMITING_THRESHOLD {
            continue;
        }
        match worst {
            Some((_, current)) if value >= current => {}
            _ => worst = Some((feature, value)),
        }
    }
    worst.map(|(feature, _)| feature)
}

fn recommendation(
    request: &EstimationRequest,
    factors: &AdjustmentFactors,
    limiting: Option<Feature>,
) -> String {
    match limiting {
        Some(feature) => {
            let input = crate::factors::feature_input(request, feature);
            let advice = corrective_advice(feature, input)
                .unwrap_or_else(|| format!("Review the {} input", feature));
            format!(
                "{} is the main constraint ({:+.1}% yield). {}.",
                feature,
                (factors.get(feature) - 1.0) * 100.0,
                advice
            )
        }
        None if factors.fertilizer <= 1.0 => format!(
            "Conditions are near optimal for {}. Fertilizer is the remaining lever: each 100 kg/ha adds 20%.",
            request.crop
        ),
        None => format!(
            "Conditions are near optimal for {}; maintain current practices.",
            request.crop
        ),
    }
}
