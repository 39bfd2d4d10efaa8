//! Risk tiering policy
//!
//! Pure threshold mapping from a class-1 probability to one of four
//! ordered risk tiers. Thresholds operate on the percentage scale; each
//! band's inclusive upper bound belongs to that band.

use celiguard_core::{RiskAssessment, RiskLevel};

/// Map a probability in [0, 1] to a risk tier
pub fn tier(probability: f64) -> RiskLevel {
    let pct = probability * 100.0;
    if pct > 75.0 {
        RiskLevel::High
    } else if pct > 50.0 {
        RiskLevel::Moderate
    } else if pct > 25.0 {
        RiskLevel::Low
    } else {
        RiskLevel::VeryLow
    }
}

/// Fixed advisory text per tier. These strings are data, not logic, and
/// may be localized without changing tier selection.
pub fn description(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::High => {
            "High likelihood of celiac disease; specialist referral and confirmatory testing are strongly advised."
        }
        RiskLevel::Moderate => {
            "Elevated likelihood of celiac disease; symptom monitoring and follow-up testing are recommended."
        }
        RiskLevel::Low => {
            "Some indicators present; routine follow-up is sufficient unless symptoms progress."
        }
        RiskLevel::VeryLow => "No significant indicators; the clinical picture is stable.",
    }
}

/// Probability on the percentage scale, rounded to exactly 2 decimals
pub fn risk_percentage(probability: f64) -> f64 {
    (probability * 100.0 * 100.0).round() / 100.0
}

/// Build the full assessment for one classifier outcome
pub fn assess(probability: f64, confidence: f64) -> RiskAssessment {
    let level = tier(probability);
    RiskAssessment {
        risk_percentage: risk_percentage(probability),
        risk_level: level,
        description: description(level).to_string(),
        model_confidence: confidence,
    }
}
