//! Insight records returned alongside projections

use serde::Serialize;
use std::fmt;

use crate::core::ScenarioKind;

/// Label reported in every insight's `model` field. The insights are fixed
/// rules, not a trained model.
pub const PREDICTOR_LABEL: &str = "RetireWise AI Predictor v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }

    /// Points deducted from the prediction confidence score.
    pub fn confidence_penalty(&self) -> f64 {
        match self {
            RiskLevel::Low => 0.0,
            RiskLevel::Moderate => 5.0,
            RiskLevel::High => 10.0,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BandPoint {
    pub corpus: i64,
    pub monthly_pension: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectionBand {
    pub cautious: BandPoint,
    pub realistic: BandPoint,
    pub optimistic: BandPoint,
}

/// Annotation attached to a single projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionInsight {
    pub model: &'static str,
    pub confidence_score: i64,
    pub risk_level: RiskLevel,
    pub projection_band: ProjectionBand,
    pub summary: &'static str,
    pub recommended_actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContributionRange {
    pub lower: i64,
    pub target: i64,
    pub upper: i64,
}

/// Annotation attached to a required-contribution estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationInsight {
    pub model: &'static str,
    pub confidence_score: i64,
    pub recommended_contribution_range: ContributionRange,
    pub summary: String,
    pub strategic_note: &'static str,
}

/// Annotation attached to a three-way scenario comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInsight {
    pub model: &'static str,
    pub confidence_score: i64,
    pub best_scenario: ScenarioKind,
    pub summary: String,
    pub insights: [String; 3],
}
