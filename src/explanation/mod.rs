//! Rule-based explanation of an estimate
//!
//! Turns the adjustment factors into benefit and warning cards, names the
//! limiting factor and produces a one-line recommendation.

pub mod types;
pub mod fragments;
pub mod generator;

pub use types::{BenefitCard, FactorCard, FactorFragment, Severity, WarningCard, YieldExplanation};
pub use fragments::{corrective_advice, generate_factor_fragment};
pub use generator::{explain, ExplanationGenerator};
