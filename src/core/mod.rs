//! Projection engine: pure retirement corpus and pension arithmetic.

mod engine;
mod error;
mod solver;
mod types;

pub use engine::{
    calculate_future_value, calculate_inflation_adjusted, calculate_lump_sum,
    calculate_monthly_pension, calculate_pension, calculate_retirement, calculate_scenarios,
    round_to_cents,
};
pub use error::DomainError;
pub use solver::{calculate_required_contribution, required_corpus, solve_contribution};
pub use types::{
    CalculationInput, ContributionRequest, ProjectionResult, ScenarioInput, ScenarioKind,
    ScenarioSet,
};
