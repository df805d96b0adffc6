//! Projection + insight bundles shared by the HTTP API and the CLI.

use serde::Serialize;

use crate::core::{
    CalculationInput, ContributionRequest, DomainError, ProjectionResult, ScenarioInput,
    ScenarioSet, calculate_retirement, calculate_scenarios, solve_contribution,
};
use crate::insight::{
    EstimationInsight, PredictionInsight, ScenarioInsight, generate_estimation_insight,
    generate_prediction, generate_scenario_insight,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationReport {
    #[serde(flatten)]
    pub projection: ProjectionResult,
    pub ai_prediction: PredictionInsight,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationReport {
    pub desired_monthly_pension: f64,
    pub required_monthly_contribution: f64,
    pub ai_contribution_insights: EstimationInsight,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
    #[serde(flatten)]
    pub scenarios: ScenarioSet,
    pub ai_scenario_insights: ScenarioInsight,
}

pub fn calculation_report(input: &CalculationInput) -> Result<CalculationReport, DomainError> {
    let projection = calculate_retirement(input)?;
    Ok(CalculationReport {
        ai_prediction: generate_prediction(input, &projection),
        projection,
    })
}

pub fn estimation_report(request: &ContributionRequest) -> Result<EstimationReport, DomainError> {
    let required = solve_contribution(request)?;
    Ok(EstimationReport {
        desired_monthly_pension: request.desired_monthly_pension,
        required_monthly_contribution: required,
        ai_contribution_insights: generate_estimation_insight(request, required),
    })
}

pub fn scenario_report(input: &ScenarioInput) -> Result<ScenarioReport, DomainError> {
    let scenarios = calculate_scenarios(input)?;
    Ok(ScenarioReport {
        ai_scenario_insights: generate_scenario_insight(&scenarios),
        scenarios,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn calculation_report_serializes_flat_projection_with_insight() {
        let report = calculation_report(&CalculationInput {
            current_age: 30,
            retirement_age: 60,
            monthly_contribution: 10_000.0,
            expected_return: 10.0,
            annuity_return: 8.0,
        })
        .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalRetirementCorpus"], Value::from(22_604_879.25));
        assert_eq!(json["yearsToRetirement"], Value::from(30));
        assert_eq!(json["aiPrediction"]["riskLevel"], "Moderate");
        assert_eq!(json["aiPrediction"]["confidenceScore"], 94);
        assert_eq!(
            json["aiPrediction"]["projectionBand"]["cautious"]["monthlyPension"],
            51_841
        );
    }

    #[test]
    fn estimation_report_rejects_zero_annuity() {
        let err = estimation_report(&ContributionRequest {
            desired_monthly_pension: 20_000.0,
            current_age: 30,
            retirement_age: 60,
            expected_return: 10.0,
            annuity_return: 0.0,
        })
        .unwrap_err();
        assert_eq!(err, DomainError::NonPositiveAnnuityRate(0.0));
    }

    #[test]
    fn scenario_report_serializes_named_scenarios() {
        let report = scenario_report(&ScenarioInput {
            current_age: 30,
            retirement_age: 60,
            monthly_contribution: 10_000.0,
            annuity_return: 8.0,
        })
        .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["conservative"].is_object());
        assert!(json["moderate"].is_object());
        assert!(json["aggressive"].is_object());
        assert_eq!(json["aiScenarioInsights"]["bestScenario"], "Aggressive");
        assert_eq!(json["aiScenarioInsights"]["insights"].as_array().unwrap().len(), 3);
    }
}
