use super::engine::{ANNUITY_SHARE, annuity_factor, ensure_finite, monthly_rate, round_to_cents};
use super::error::{DomainError, Result};
use super::types::ContributionRequest;

/// Corpus whose annuity share yields `desired_annual_pension` at
/// `annuity_return` percent.
pub fn required_corpus(desired_annual_pension: f64, annuity_return: f64) -> Result<f64> {
    ensure_finite(annuity_return, "annuity return")?;
    if annuity_return <= 0.0 {
        return Err(DomainError::NonPositiveAnnuityRate(annuity_return));
    }
    ensure_finite(
        desired_annual_pension * 100.0 / (ANNUITY_SHARE * annuity_return),
        "required corpus",
    )
}

/// Monthly contribution needed to retire on `desired_monthly_pension`.
///
/// Inverts the annuity split and then the future-value formula used by
/// [`super::calculate_retirement`].
pub fn calculate_required_contribution(
    desired_monthly_pension: f64,
    current_age: u32,
    retirement_age: u32,
    expected_return: f64,
    annuity_return: f64,
) -> Result<f64> {
    ensure_finite(desired_monthly_pension, "desired monthly pension")?;
    ensure_finite(expected_return, "expected return")?;

    let corpus = required_corpus(desired_monthly_pension * 12.0, annuity_return)?;

    let years = i64::from(retirement_age) - i64::from(current_age);
    if years <= 0 {
        return Err(DomainError::NonPositiveHorizon { years });
    }
    let rate = monthly_rate(expected_return);
    let payments = years as f64 * 12.0;

    let contribution = if rate == 0.0 {
        corpus / payments
    } else {
        corpus / annuity_factor(rate, payments)
    };

    ensure_finite(contribution, "required contribution").map(round_to_cents)
}

pub fn solve_contribution(request: &ContributionRequest) -> Result<f64> {
    calculate_required_contribution(
        request.desired_monthly_pension,
        request.current_age,
        request.retirement_age,
        request.expected_return,
        request.annuity_return,
    )
}
