use crate::explanation::types::{BenefitCard, FactorCard, FactorFragment, Severity, WarningCard};
use crate::factors::{feature_input, feature_optimum, AdjustmentFactors};
use crate::types::{EstimationRequest, Feature};

/// Build the card for one feature
fn factor_card(request: &EstimationRequest, factors: &AdjustmentFactors, feature: Feature) -> FactorCard {
    let factor = factors.get(feature);
    let severity = match feature {
        Feature::Fertilizer if factor >= 1.0 => Severity::None,
        Feature::Fertilizer => Severity::High,
        _ => Severity::from_factor(factor),
    };

    FactorCard {
        feature,
        input: feature_input(request, feature),
        optimum: feature_optimum(feature),
        factor,
        impact_pct: (factor - 1.0) * 100.0,
        severity,
    }
}

/// Generate explanation fragment for one feature
pub fn generate_factor_fragment(
    request: &EstimationRequest,
    factors: &AdjustmentFactors,
    feature: Feature,
) -> FactorFragment {
    let card = factor_card(request, factors, feature);
    match feature {
        Feature::SoilPH => soil_ph_fragment(card),
        Feature::Rainfall => rainfall_fragment(card),
        Feature::Temperature => temperature_fragment(card),
        Feature::Fertilizer => fertilizer_fragment(card),
    }
}

/// Corrective advice for an off-optimum environmental factor.
///
/// Returns None for fertilizer and for inputs sitting on the optimum.
pub fn corrective_advice(feature: Feature, input: f64) -> Option<String> {
    let optimum = feature_optimum(feature)?;
    let advice = match feature {
        Feature::SoilPH if input < optimum => format!(
            "Apply agricultural lime to raise soil pH from {:.1} toward {:.1}",
            input, optimum
        ),
        Feature::SoilPH if input > optimum => format!(
            "Apply elemental sulfur or acidifying amendments to lower soil pH from {:.1} toward {:.1}",
            input, optimum
        ),
        Feature::Rainfall if input < optimum => format!(
            "Supplement with irrigation to cover the {:.0} mm rainfall deficit",
            optimum - input
        ),
        Feature::Rainfall if input > optimum => format!(
            "Improve field drainage; rainfall is {:.0} mm above what the crop can use",
            input - optimum
        ),
        Feature::Temperature if input < optimum => {
            "Shift planting later or choose cold-tolerant varieties to reduce cool-season stress".to_string()
        }
        Feature::Temperature if input > optimum => {
            "Use heat-tolerant varieties, mulching or an earlier planting window to reduce heat stress".to_string()
        }
        _ => return None,
    };
    Some(advice)
}

fn near_optimum_benefit(card: &FactorCard, benefit_type: &str, unit: &str) -> BenefitCard {
    let optimum = card.optimum.unwrap_or(card.input);
    BenefitCard {
        benefit_type: benefit_type.to_string(),
        feature: card.feature,
        title: format!("{} near optimum", card.feature),
        message: format!("{:.1}{} vs optimum {:.1}{}", card.input, unit, optimum, unit),
        detail: format!("Costs {:.1}% of yield", -card.impact_pct.min(0.0)),
    }
}

fn off_optimum_warning(card: &FactorCard, warning_type: &str, message: String) -> WarningCard {
    WarningCard {
        warning_type: warning_type.to_string(),
        feature: Some(card.feature),
        severity: card.severity,
        icon: card.severity.icon().to_string(),
        message,
        detail: format!(
            "{} factor {:.3} ({:+.1}% yield)",
            card.feature, card.factor, card.impact_pct
        ),
        advice: corrective_advice(card.feature, card.input).unwrap_or_default(),
    }
}

fn soil_ph_fragment(card: FactorCard) -> FactorFragment {
    if card.severity == Severity::None {
        let benefit = near_optimum_benefit(&card, "soil_ph_optimal", "");
        return FactorFragment::with_benefit(card, benefit);
    }

    let (warning_type, message) = if card.input < crate::factors::OPTIMAL_PH {
        ("soil_ph_acidic", format!("Acidic soil (pH {:.1}) limits nutrient uptake", card.input))
    } else {
        ("soil_ph_alkaline", format!("Alkaline soil (pH {:.1}) limits nutrient uptake", card.input))
    };
    let warning = off_optimum_warning(&card, warning_type, message);
    FactorFragment::with_warning(card, warning)
}

fn rainfall_fragment(card: FactorCard) -> FactorFragment {
    if card.severity == Severity::None {
        let benefit = near_optimum_benefit(&card, "rainfall_optimal", " mm");
        return FactorFragment::with_benefit(card, benefit);
    }

    let (warning_type, message) = if card.input < crate::factors::OPTIMAL_RAINFALL_MM {
        ("rainfall_deficit", format!("Low rainfall ({:.0} mm) risks drought stress", card.input))
    } else {
        ("rainfall_excess", format!("High rainfall ({:.0} mm) risks waterlogging", card.input))
    };
    let warning = off_optimum_warning(&card, warning_type, message);
    FactorFragment::with_warning(card, warning)
}

fn temperature_fragment(card: FactorCard) -> FactorFragment {
    if card.severity == Severity::None {
        let benefit = near_optimum_benefit(&card, "temperature_optimal", " °C");
        return FactorFragment::with_benefit(card, benefit);
    }

    let (warning_type, message) = if card.input < crate::factors::OPTIMAL_TEMPERATURE_C {
        ("temperature_cold", format!("Cool conditions ({:.1} °C) slow crop development", card.input))
    } else {
        ("temperature_heat", format!("Heat ({:.1} °C) stresses the crop", card.input))
    };
    let warning = off_optimum_warning(&card, warning_type, message);
    FactorFragment::with_warning(card, warning)
}

fn fertilizer_fragment(card: FactorCard) -> FactorFragment {
    if card.factor > 1.0 {
        let benefit = BenefitCard {
            benefit_type: "fertilizer_boost".to_string(),
            feature: Feature::Fertilizer,
            title: "Fertilizer boost".to_string(),
            message: format!("{:.0} kg/ha adds {:.1}% yield", card.input, card.impact_pct),
            detail: "Each 100 kg/ha adds 20%; the heuristic has no saturation point".to_string(),
        };
        FactorFragment::with_benefit(card, benefit)
    } else if card.factor < 1.0 {
        let warning = WarningCard {
            warning_type: "fertilizer_negative".to_string(),
            feature: Some(Feature::Fertilizer),
            severity: Severity::High,
            icon: Severity::High.icon().to_string(),
            message: format!("Negative fertilizer rate ({:.0} kg/ha)", card.input),
            detail: format!("Fertilizer factor {:.3} reduces the estimate", card.factor),
            advice: "Check the fertilizer input; rates below zero are not physical".to_string(),
        };
        FactorFragment::with_warning(card, warning)
    } else {
        FactorFragment::neutral(card)
    }
}
