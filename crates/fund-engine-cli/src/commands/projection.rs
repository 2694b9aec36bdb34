use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use fund_engine_core::projection::returns::ProjectionInput;
use fund_engine_core::projection::scenarios::{self, ReturnScenario};
use fund_engine_core::FundPolicy;

use super::envelope;
use crate::input;

const IRR_NOTE: &str = "IRR is (total carry / amount)^(1/years) - 1 on carry taken from \
                        compounded notional; it is not a cash-flow IRR";

/// Arguments for a carry revenue projection
#[derive(Args)]
pub struct ProjectArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Investment amount
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Projection horizon in years
    #[arg(long, default_value = "4")]
    pub years: u32,

    /// Expected annual return (e.g. 0.12 for 12%)
    #[arg(long, default_value = "0.12", allow_hyphen_values = true)]
    pub annual_return: Decimal,
}

/// Arguments for scenario analysis
#[derive(Args)]
pub struct ScenariosArgs {
    /// Investment amount
    #[arg(long)]
    pub amount: Decimal,

    /// Projection horizon in years
    #[arg(long, default_value = "4")]
    pub years: u32,

    /// Extra scenarios as NAME=RATE (e.g. "Stress=-0.05"); replaces the configured set
    #[arg(long = "scenario", value_parser = parse_scenario, allow_hyphen_values = true)]
    pub scenarios: Vec<ReturnScenario>,
}

fn parse_scenario(s: &str) -> Result<ReturnScenario, String> {
    let (name, rate) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected NAME=RATE, got '{s}'"))?;
    let rate: Decimal = rate
        .trim()
        .parse()
        .map_err(|e| format!("Invalid rate '{rate}': {e}"))?;
    Ok(ReturnScenario::new(name.trim(), rate))
}

pub fn run_project(
    args: ProjectArgs,
    policy: &FundPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let request = match (args.input.as_deref(), args.amount) {
        (None, Some(amount)) => ProjectionInput {
            amount,
            years: args.years,
            annual_return_rate: args.annual_return,
        },
        (path, _) => input::read_request::<ProjectionInput>(path)?
            .ok_or("--amount is required (or provide --input or JSON on stdin)")?,
    };

    let start = Instant::now();
    let result = policy.projector().project_input(&request)?;
    envelope(
        "Tiered carry projection on compounded notional",
        &serde_json::json!({
            "amount": request.amount.to_string(),
            "years": request.years,
            "annual_return_rate": request.annual_return_rate.to_string(),
        }),
        vec![IRR_NOTE.to_string()],
        start,
        result,
    )
}

pub fn run_scenarios(
    args: ScenariosArgs,
    policy: &FundPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let scenario_set = if args.scenarios.is_empty() {
        policy.scenarios.clone()
    } else {
        args.scenarios
    };

    let start = Instant::now();
    let out = scenarios::run_scenarios(&policy.projector(), args.amount, args.years, &scenario_set)?;
    envelope(
        "Carry projection across annual return scenarios",
        &serde_json::json!({
            "amount": args.amount.to_string(),
            "years": args.years,
            "scenarios": scenario_set.len(),
        }),
        vec![IRR_NOTE.to_string()],
        start,
        out,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_scenario() {
        let s = parse_scenario("Stress = -0.05").unwrap();
        assert_eq!(s.name, "Stress");
        assert_eq!(s.annual_return, dec!(-0.05));
        assert!(parse_scenario("nope").is_err());
        assert!(parse_scenario("x=abc").is_err());
    }
}
