use super::error::{DomainError, Result};
use super::types::{CalculationInput, ProjectionResult, ScenarioInput, ScenarioKind, ScenarioSet};

const LUMP_SUM_SHARE: f64 = 0.6;
pub(crate) const ANNUITY_SHARE: f64 = 0.4;
const MONTHS_PER_YEAR: f64 = 12.0;

pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn ensure_finite(value: f64, what: &'static str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite(what))
    }
}

pub(crate) fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR
}

/// Growth factor of a level monthly annuity: `((1 + r)^n - 1) / r`.
/// Evaluated through `ln_1p`/`exp_m1` so rates too small to change `1 + r`
/// still converge on `n`. The caller handles `r == 0`.
pub(crate) fn annuity_factor(rate: f64, payments: f64) -> f64 {
    (payments * rate.ln_1p()).exp_m1() / rate
}

/// Future value of `monthly_contribution` paid every month for `years` years
/// at an annual return of `annual_return_rate` percent, compounded monthly.
///
/// A zero rate degenerates to the plain sum of contributions, which is
/// returned unrounded.
pub fn calculate_future_value(
    monthly_contribution: f64,
    annual_return_rate: f64,
    years: u32,
) -> Result<f64> {
    ensure_finite(monthly_contribution, "monthly contribution")?;
    ensure_finite(annual_return_rate, "annual return rate")?;

    let rate = monthly_rate(annual_return_rate);
    let payments = f64::from(years) * MONTHS_PER_YEAR;

    if rate == 0.0 {
        return ensure_finite(monthly_contribution * payments, "future value");
    }

    let future_value = monthly_contribution * annuity_factor(rate, payments);
    ensure_finite(future_value, "future value").map(round_to_cents)
}

pub fn calculate_lump_sum(total_corpus: f64) -> f64 {
    round_to_cents(total_corpus * LUMP_SUM_SHARE)
}

/// Annual pension bought with the share of the corpus kept for the annuity.
pub fn calculate_pension(total_corpus: f64, annuity_rate: f64) -> f64 {
    let remaining_corpus = total_corpus * ANNUITY_SHARE;
    round_to_cents(remaining_corpus * annuity_rate / 100.0)
}

pub fn calculate_monthly_pension(annual_pension: f64) -> f64 {
    round_to_cents(annual_pension / MONTHS_PER_YEAR)
}

pub fn calculate_retirement(input: &CalculationInput) -> Result<ProjectionResult> {
    let years = i64::from(input.retirement_age) - i64::from(input.current_age);
    if years <= 0 {
        return Err(DomainError::NonPositiveHorizon { years });
    }
    let years_to_retirement = years as u32;

    let total_retirement_corpus = calculate_future_value(
        input.monthly_contribution,
        input.expected_return,
        years_to_retirement,
    )?;
    ensure_finite(input.annuity_return, "annuity return")?;
    if input.annuity_return < 0.0 {
        return Err(DomainError::NonPositiveAnnuityRate(input.annuity_return));
    }

    let lump_sum = calculate_lump_sum(total_retirement_corpus);
    let annual_pension = calculate_pension(total_retirement_corpus, input.annuity_return);
    let monthly_pension = calculate_monthly_pension(annual_pension);
    let total_contribution = ensure_finite(
        input.monthly_contribution * f64::from(years_to_retirement) * MONTHS_PER_YEAR,
        "total contribution",
    )?;

    Ok(ProjectionResult {
        total_retirement_corpus,
        lump_sum,
        annual_pension,
        monthly_pension,
        years_to_retirement,
        total_contribution,
    })
}

pub fn calculate_scenarios(input: &ScenarioInput) -> Result<ScenarioSet> {
    let project = |kind: ScenarioKind| {
        calculate_retirement(&input.with_expected_return(kind.expected_return()))
    };

    Ok(ScenarioSet {
        conservative: project(ScenarioKind::Conservative)?,
        moderate: project(ScenarioKind::Moderate)?,
        aggressive: project(ScenarioKind::Aggressive)?,
    })
}

/// Value of `current_value` after `years` of compound inflation.
pub fn calculate_inflation_adjusted(
    current_value: f64,
    inflation_rate: f64,
    years: f64,
) -> Result<f64> {
    let multiplier = (1.0 + inflation_rate / 100.0).powf(years);
    ensure_finite(current_value * multiplier, "inflation adjusted value").map(round_to_cents)
}
