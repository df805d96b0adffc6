//! Request parsing at the HTTP boundary.
//!
//! Numeric fields arrive as JSON numbers or numeric strings (HTML forms send
//! the latter). Anything else is reported, never coerced to a default. All
//! problems in a payload are collected before failing so the caller sees
//! every message at once.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::{CalculationInput, ContributionRequest, ScenarioInput, round_to_cents};

const MIN_CURRENT_AGE: f64 = 18.0;
const MAX_CURRENT_AGE: f64 = 75.0;
const MAX_RETIREMENT_AGE: f64 = 80.0;
const MAX_RATE: f64 = 30.0;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", .0.join("; "))]
pub struct ValidationError(pub Vec<String>);

impl ValidationError {
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CalculatorPayload {
    pub current_age: Option<Value>,
    pub retirement_age: Option<Value>,
    pub monthly_contribution: Option<Value>,
    pub expected_return: Option<Value>,
    pub annuity_return: Option<Value>,
    pub desired_monthly_pension: Option<Value>,
    pub forecast_name: Option<Value>,
}

#[derive(Default)]
struct Validator {
    errors: Vec<String>,
}

impl Validator {
    /// Parses an optional numeric field. Absent, null and blank values are
    /// `None`; malformed values record an error and are also `None`.
    fn number(&mut self, label: &str, value: Option<&Value>) -> Option<f64> {
        match parse_number(value) {
            Ok(parsed) => parsed,
            Err(()) => {
                self.errors.push(format!("{label} must be a number"));
                None
            }
        }
    }

    fn require(
        &mut self,
        value: Option<f64>,
        ok: impl Fn(f64) -> bool,
        message: &str,
    ) -> Option<f64> {
        match value {
            Some(v) if ok(v) => Some(v),
            _ => {
                self.errors.push(message.to_string());
                None
            }
        }
    }

    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.errors.is_empty() => Ok(value),
            _ => Err(ValidationError(self.errors)),
        }
    }
}

fn parse_number(value: Option<&Value>) -> Result<Option<f64>, ()> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()).map(Some).ok_or(()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(()),
        },
        Some(_) => Err(()),
    }
}

struct Horizon {
    current_age: u32,
    retirement_age: u32,
}

fn horizon(v: &mut Validator, payload: &CalculatorPayload) -> Option<Horizon> {
    let current = v
        .number("Current age", payload.current_age.as_ref())
        .map(f64::floor);
    let retirement = v
        .number("Retirement age", payload.retirement_age.as_ref())
        .map(f64::floor);

    let current = v.require(
        current,
        |age| (MIN_CURRENT_AGE..=MAX_CURRENT_AGE).contains(&age),
        "Current age must be between 18 and 75",
    );
    let retirement = v.require(
        retirement,
        |age| age <= MAX_RETIREMENT_AGE && current.is_none_or(|c| age > c),
        "Retirement age must be greater than current age and not exceed 80",
    );

    Some(Horizon {
        current_age: current? as u32,
        retirement_age: retirement? as u32,
    })
}

fn monthly_contribution(v: &mut Validator, payload: &CalculatorPayload) -> Option<f64> {
    let raw = v.number("Monthly contribution", payload.monthly_contribution.as_ref());
    v.require(
        raw,
        |amount| amount >= 0.0,
        "Monthly contribution must be a non-negative number",
    )
    .map(round_to_cents)
}

fn expected_return(v: &mut Validator, payload: &CalculatorPayload) -> Option<f64> {
    let raw = v.number("Expected return", payload.expected_return.as_ref());
    v.require(
        raw,
        |rate| (0.0..=MAX_RATE).contains(&rate),
        "Expected return must be between 0 and 30 percent",
    )
    .map(round_to_cents)
}

fn annuity_return(v: &mut Validator, payload: &CalculatorPayload) -> Option<f64> {
    let raw = v.number("Annuity return", payload.annuity_return.as_ref());
    let rate = v.require(
        raw,
        |rate| rate > 0.0 && rate <= MAX_RATE,
        "Annuity return must be greater than 0 and at most 30 percent",
    )?;

    let rate = round_to_cents(rate);
    if rate <= 0.0 {
        v.errors
            .push("Annuity return must be at least 0.01 percent".to_string());
        return None;
    }
    Some(rate)
}

pub fn validate_calculation(
    payload: &CalculatorPayload,
) -> Result<CalculationInput, ValidationError> {
    let mut v = Validator::default();
    let horizon = horizon(&mut v, payload);
    let contribution = monthly_contribution(&mut v, payload);
    let expected = expected_return(&mut v, payload);
    let annuity = annuity_return(&mut v, payload);

    let input = match (horizon, contribution, expected, annuity) {
        (Some(horizon), Some(monthly_contribution), Some(expected_return), Some(annuity_return)) => {
            Some(CalculationInput {
                current_age: horizon.current_age,
                retirement_age: horizon.retirement_age,
                monthly_contribution,
                expected_return,
                annuity_return,
            })
        }
        _ => None,
    };
    v.finish(input)
}

/// Scenario comparisons pin their own expected returns, so the field is
/// ignored here.
pub fn validate_scenario(payload: &CalculatorPayload) -> Result<ScenarioInput, ValidationError> {
    let mut v = Validator::default();
    let horizon = horizon(&mut v, payload);
    let contribution = monthly_contribution(&mut v, payload);
    let annuity = annuity_return(&mut v, payload);

    let input = match (horizon, contribution, annuity) {
        (Some(horizon), Some(monthly_contribution), Some(annuity_return)) => Some(ScenarioInput {
            current_age: horizon.current_age,
            retirement_age: horizon.retirement_age,
            monthly_contribution,
            annuity_return,
        }),
        _ => None,
    };
    v.finish(input)
}

pub fn validate_contribution(
    payload: &CalculatorPayload,
) -> Result<ContributionRequest, ValidationError> {
    let mut v = Validator::default();
    let desired = v.number(
        "Desired monthly pension",
        payload.desired_monthly_pension.as_ref(),
    );
    let desired = v.require(
        desired,
        |amount| amount > 0.0,
        "Valid desired monthly pension is required",
    );
    let horizon = horizon(&mut v, payload);
    let expected = expected_return(&mut v, payload);
    let annuity = annuity_return(&mut v, payload);

    let request = match (desired, horizon, expected, annuity) {
        (Some(desired_monthly_pension), Some(horizon), Some(expected_return), Some(annuity_return)) => {
            Some(ContributionRequest {
                desired_monthly_pension,
                current_age: horizon.current_age,
                retirement_age: horizon.retirement_age,
                expected_return,
                annuity_return,
            })
        }
        _ => None,
    };
    v.finish(request)
}

pub fn validate_forecast_name(payload: &CalculatorPayload) -> Result<String, ValidationError> {
    match payload.forecast_name.as_ref() {
        Some(Value::String(name)) if !name.trim().is_empty() => Ok(name.trim().to_string()),
        _ => Err(ValidationError::single("Forecast name is required")),
    }
}
