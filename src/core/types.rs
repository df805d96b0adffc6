use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_contribution: f64,
    pub expected_return: f64,
    pub annuity_return: f64,
}

/// Scenario comparison input. Expected return is supplied per scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub monthly_contribution: f64,
    pub annuity_return: f64,
}

impl ScenarioInput {
    pub fn with_expected_return(self, expected_return: f64) -> CalculationInput {
        CalculationInput {
            current_age: self.current_age,
            retirement_age: self.retirement_age,
            monthly_contribution: self.monthly_contribution,
            expected_return,
            annuity_return: self.annuity_return,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionRequest {
    pub desired_monthly_pension: f64,
    pub current_age: u32,
    pub retirement_age: u32,
    pub expected_return: f64,
    pub annuity_return: f64,
}

impl ContributionRequest {
    pub fn years_to_retirement(&self) -> i64 {
        i64::from(self.retirement_age) - i64::from(self.current_age)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    pub total_retirement_corpus: f64,
    pub lump_sum: f64,
    pub annual_pension: f64,
    pub monthly_pension: f64,
    pub years_to_retirement: u32,
    pub total_contribution: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ScenarioKind {
    Conservative,
    Moderate,
    Aggressive,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [
        ScenarioKind::Conservative,
        ScenarioKind::Moderate,
        ScenarioKind::Aggressive,
    ];

    /// Annual expected return in percent assumed by this scenario.
    pub fn expected_return(self) -> f64 {
        match self {
            ScenarioKind::Conservative => 8.0,
            ScenarioKind::Moderate => 10.0,
            ScenarioKind::Aggressive => 12.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScenarioKind::Conservative => "Conservative",
            ScenarioKind::Moderate => "Moderate",
            ScenarioKind::Aggressive => "Aggressive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub conservative: ProjectionResult,
    pub moderate: ProjectionResult,
    pub aggressive: ProjectionResult,
}

impl ScenarioSet {
    pub fn get(&self, kind: ScenarioKind) -> &ProjectionResult {
        match kind {
            ScenarioKind::Conservative => &self.conservative,
            ScenarioKind::Moderate => &self.moderate,
            ScenarioKind::Aggressive => &self.aggressive,
        }
    }
}
