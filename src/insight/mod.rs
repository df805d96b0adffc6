//! Insight derivation
//!
//! Deterministic rule-based annotations computed from projection output:
//! risk level, confidence score, projection bands and guidance text. Every
//! value is a pure function of its inputs, so the same projection always
//! yields the same insight. Nothing here is persisted.

mod estimation;
mod format;
mod prediction;
mod scenario;
mod types;

pub use estimation::{contribution_range, generate_estimation_insight};
pub use format::format_indian;
pub use prediction::{generate_prediction, projection_band, recommended_actions, risk_level};
pub use scenario::{balance_gap, best_scenario, generate_scenario_insight, scenario_spread};
pub use types::{
    BandPoint, ContributionRange, EstimationInsight, PREDICTOR_LABEL, PredictionInsight,
    ProjectionBand, RiskLevel, ScenarioInsight,
};

/// Clamps `raw` into `[min, max]` and rounds to an integer score. A NaN input
/// lands on `min`.
pub(crate) fn bounded_score(raw: f64, min: f64, max: f64) -> i64 {
    raw.max(min).min(max).round() as i64
}
