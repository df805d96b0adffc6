use super::bounded_score;
use super::types::{PREDICTOR_LABEL, ScenarioInsight};
use crate::core::{ScenarioKind, ScenarioSet};

const MIN_CONFIDENCE: f64 = 61.0;
const MAX_CONFIDENCE: f64 = 92.0;
const HIGH_SENSITIVITY_SPREAD: f64 = 40.0;

/// Percentage gap between the aggressive and conservative corpus.
pub fn scenario_spread(scenarios: &ScenarioSet) -> f64 {
    let conservative = scenarios.conservative.total_retirement_corpus;
    let aggressive = scenarios.aggressive.total_retirement_corpus;
    if conservative > 0.0 {
        (aggressive - conservative) / conservative * 100.0
    } else {
        0.0
    }
}

/// Percentage gap between the aggressive and moderate corpus.
pub fn balance_gap(scenarios: &ScenarioSet) -> f64 {
    let moderate = scenarios.moderate.total_retirement_corpus;
    let aggressive = scenarios.aggressive.total_retirement_corpus;
    if moderate > 0.0 && aggressive > 0.0 {
        (aggressive - moderate) / moderate * 100.0
    } else {
        0.0
    }
}

pub fn best_scenario(scenarios: &ScenarioSet) -> ScenarioKind {
    let conservative = scenarios.conservative.total_retirement_corpus;
    let moderate = scenarios.moderate.total_retirement_corpus;
    let aggressive = scenarios.aggressive.total_retirement_corpus;

    if aggressive >= moderate && aggressive >= conservative {
        ScenarioKind::Aggressive
    } else if moderate >= conservative {
        ScenarioKind::Moderate
    } else {
        ScenarioKind::Conservative
    }
}

pub fn confidence_score(spread: f64) -> i64 {
    bounded_score(
        86.0 - (spread - 45.0).abs() * 0.2,
        MIN_CONFIDENCE,
        MAX_CONFIDENCE,
    )
}

pub fn generate_scenario_insight(scenarios: &ScenarioSet) -> ScenarioInsight {
    let spread = scenario_spread(scenarios);
    let balance = balance_gap(scenarios);
    let best = best_scenario(scenarios);
    let sensitivity = if spread > HIGH_SENSITIVITY_SPREAD {
        "high sensitivity"
    } else {
        "moderate sensitivity"
    };

    ScenarioInsight {
        model: PREDICTOR_LABEL,
        confidence_score: confidence_score(spread),
        best_scenario: best,
        summary: format!(
            "AI comparison indicates {} strategy yields the highest projected corpus with a {spread:.1}% spread between conservative and aggressive outcomes.",
            best.as_str()
        ),
        insights: [
            format!(
                "Scenario spread is {spread:.1}%, indicating {sensitivity} to return assumptions."
            ),
            format!(
                "Moderate plan stays within {:.1}% of aggressive corpus, making it a balanced choice for many investors.",
                balance.abs()
            ),
            "Revisit your risk mix annually and align allocation with changing goals and retirement horizon."
                .to_string(),
        ],
    }
}
