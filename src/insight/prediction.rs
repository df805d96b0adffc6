use super::bounded_score;
use super::types::{BandPoint, PREDICTOR_LABEL, PredictionInsight, ProjectionBand, RiskLevel};
use crate::core::{CalculationInput, ProjectionResult};

const MIN_CONFIDENCE: f64 = 58.0;
const MAX_CONFIDENCE: f64 = 94.0;
const MAX_ACTIONS: usize = 3;

pub fn risk_level(expected_return: f64, years_to_retirement: u32) -> RiskLevel {
    if expected_return >= 12.0 || years_to_retirement < 12 {
        RiskLevel::High
    } else if expected_return >= 9.0 {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

pub fn confidence_score(expected_return: f64, years_to_retirement: u32, risk: RiskLevel) -> i64 {
    let raw = 90.0 - (expected_return - 10.0).abs() * 3.0 - risk.confidence_penalty()
        + f64::from(years_to_retirement.min(25)) * 0.4;
    bounded_score(raw, MIN_CONFIDENCE, MAX_CONFIDENCE)
}

pub fn projection_band(projection: &ProjectionResult) -> ProjectionBand {
    let point = |corpus_factor: f64, pension_factor: f64| BandPoint {
        corpus: (projection.total_retirement_corpus * corpus_factor).round() as i64,
        monthly_pension: (projection.monthly_pension * pension_factor).round() as i64,
    };

    ProjectionBand {
        cautious: point(0.84, 0.86),
        realistic: point(1.02, 1.01),
        optimistic: point(1.16, 1.14),
    }
}

fn summary(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::High => {
            "AI indicates strong upside potential with higher variability; periodic rebalancing is recommended."
        }
        RiskLevel::Moderate => {
            "AI indicates balanced growth potential with manageable risk for long-term planning."
        }
        RiskLevel::Low => {
            "AI indicates stable long-term growth assumptions with relatively lower volatility."
        }
    }
}

/// Growth earned per unit contributed; zero when nothing was contributed.
fn contribution_ratio(projection: &ProjectionResult) -> f64 {
    if projection.total_contribution > 0.0 {
        (projection.total_retirement_corpus - projection.total_contribution)
            / projection.total_contribution
    } else {
        0.0
    }
}

/// Guidance lines in rule order, truncated to the first three that fire.
pub fn recommended_actions(
    input: &CalculationInput,
    projection: &ProjectionResult,
) -> Vec<&'static str> {
    let mut actions = Vec::with_capacity(4);

    if projection.years_to_retirement > 20 {
        actions.push(
            "Review and rebalance your portfolio once every year to stay aligned with long-term goals.",
        );
    } else {
        actions.push(
            "Shift a part of your portfolio toward lower-volatility assets as retirement approaches.",
        );
    }

    if input.expected_return >= 12.0 {
        actions.push(
            "Current return expectation is optimistic; keep a backup plan with lower return assumptions.",
        );
    } else if input.expected_return <= 8.0 {
        actions.push(
            "Consider increasing equity exposure gradually if your risk profile allows better long-term growth.",
        );
    }

    if input.monthly_contribution < 15_000.0 {
        actions.push(
            "Increasing monthly contributions by 5-10% can materially improve retirement outcomes.",
        );
    }

    if contribution_ratio(projection) < 1.0 {
        actions.push(
            "Projected growth is modest; prioritize contribution consistency and step-up investments annually.",
        );
    }

    actions.truncate(MAX_ACTIONS);
    actions
}

pub fn generate_prediction(
    input: &CalculationInput,
    projection: &ProjectionResult,
) -> PredictionInsight {
    let risk = risk_level(input.expected_return, projection.years_to_retirement);

    PredictionInsight {
        model: PREDICTOR_LABEL,
        confidence_score: confidence_score(
            input.expected_return,
            projection.years_to_retirement,
            risk,
        ),
        risk_level: risk,
        projection_band: projection_band(projection),
        summary: summary(risk),
        recommended_actions: recommended_actions(input, projection),
    }
}
