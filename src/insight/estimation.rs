use super::bounded_score;
use super::format::format_indian;
use super::types::{ContributionRange, EstimationInsight, PREDICTOR_LABEL};
use crate::core::ContributionRequest;

const MIN_CONFIDENCE: f64 = 60.0;
const MAX_CONFIDENCE: f64 = 93.0;

pub fn confidence_score(expected_return: f64) -> i64 {
    bounded_score(
        88.0 - (expected_return - 10.0).abs() * 2.0,
        MIN_CONFIDENCE,
        MAX_CONFIDENCE,
    )
}

pub fn contribution_range(required_monthly_contribution: f64) -> ContributionRange {
    ContributionRange {
        lower: (required_monthly_contribution * 0.92).round() as i64,
        target: required_monthly_contribution.round() as i64,
        upper: (required_monthly_contribution * 1.12).round() as i64,
    }
}

fn strategic_note(years_to_retirement: i64) -> &'static str {
    if years_to_retirement >= 20 {
        "A yearly step-up contribution strategy can significantly reduce late-stage funding pressure."
    } else {
        "With shorter accumulation time, prioritize disciplined monthly contributions and conservative return assumptions."
    }
}

pub fn generate_estimation_insight(
    request: &ContributionRequest,
    required_monthly_contribution: f64,
) -> EstimationInsight {
    let range = contribution_range(required_monthly_contribution);

    EstimationInsight {
        model: PREDICTOR_LABEL,
        confidence_score: confidence_score(request.expected_return),
        recommended_contribution_range: range,
        summary: format!(
            "AI suggests targeting around ₹{} per month for a pension goal of ₹{}.",
            format_indian(range.target as f64),
            format_indian(request.desired_monthly_pension)
        ),
        strategic_note: strategic_note(request.years_to_retirement()),
    }
}
