use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;

use retirewise::api::validate::{
    CalculatorPayload, validate_calculation, validate_contribution, validate_scenario,
};
use retirewise::config::ServerConfig;
use retirewise::core::calculate_inflation_adjusted;
use retirewise::report::{calculation_report, estimation_report, scenario_report};

#[derive(Parser, Debug)]
#[command(
    name = "retirewise",
    about = "Retirement corpus and pension planner (projection, reverse solve, scenarios)"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API
    Serve(ServerConfig),
    /// Project corpus and pension for a monthly contribution
    Calculate(CalculateArgs),
    /// Find the monthly contribution needed for a target pension
    Estimate(EstimateArgs),
    /// Compare conservative, moderate and aggressive return assumptions
    Scenario(ScenarioArgs),
    /// Grow a present value by compound inflation
    Inflate(InflateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct HorizonArgs {
    #[arg(long)]
    pub current_age: f64,
    #[arg(long)]
    pub retirement_age: f64,
    #[arg(long, help = "Annuity return in percent, e.g. 6")]
    pub annuity_return: f64,
}

#[derive(Args, Debug, Clone)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub horizon: HorizonArgs,
    #[arg(long)]
    pub monthly_contribution: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 10")]
    pub expected_return: f64,
}

#[derive(Args, Debug, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub horizon: HorizonArgs,
    #[arg(long)]
    pub desired_monthly_pension: f64,
    #[arg(long, help = "Expected annual return in percent, e.g. 10")]
    pub expected_return: f64,
}

#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    #[command(flatten)]
    pub horizon: HorizonArgs,
    #[arg(long)]
    pub monthly_contribution: f64,
}

#[derive(Args, Debug, Clone)]
pub struct InflateArgs {
    #[arg(long)]
    pub value: f64,
    #[arg(long, help = "Annual inflation in percent, e.g. 6")]
    pub rate: f64,
    #[arg(long)]
    pub years: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InflationOutput {
    current_value: f64,
    inflation_rate: f64,
    years: f64,
    inflation_adjusted_value: f64,
}

fn number(value: f64) -> Option<Value> {
    serde_json::Number::from_f64(value).map(Value::Number)
}

/// Routes CLI flags through the same boundary checks the HTTP API uses.
fn payload_from_horizon(horizon: &HorizonArgs) -> CalculatorPayload {
    CalculatorPayload {
        current_age: number(horizon.current_age),
        retirement_age: number(horizon.retirement_age),
        annuity_return: number(horizon.annuity_return),
        ..CalculatorPayload::default()
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}

pub fn cmd_calculate(args: &CalculateArgs) -> Result<String> {
    let payload = CalculatorPayload {
        monthly_contribution: number(args.monthly_contribution),
        expected_return: number(args.expected_return),
        ..payload_from_horizon(&args.horizon)
    };
    let input = validate_calculation(&payload)?;
    to_pretty_json(&calculation_report(&input)?)
}

pub fn cmd_estimate(args: &EstimateArgs) -> Result<String> {
    let payload = CalculatorPayload {
        desired_monthly_pension: number(args.desired_monthly_pension),
        expected_return: number(args.expected_return),
        ..payload_from_horizon(&args.horizon)
    };
    let request = validate_contribution(&payload)?;
    to_pretty_json(&estimation_report(&request)?)
}

pub fn cmd_scenario(args: &ScenarioArgs) -> Result<String> {
    let payload = CalculatorPayload {
        monthly_contribution: number(args.monthly_contribution),
        ..payload_from_horizon(&args.horizon)
    };
    let input = validate_scenario(&payload)?;
    to_pretty_json(&scenario_report(&input)?)
}

pub fn cmd_inflate(args: &InflateArgs) -> Result<String> {
    let adjusted = calculate_inflation_adjusted(args.value, args.rate, args.years)?;
    to_pretty_json(&InflationOutput {
        current_value: args.value,
        inflation_rate: args.rate,
        years: args.years,
        inflation_adjusted_value: adjusted,
    })
}
