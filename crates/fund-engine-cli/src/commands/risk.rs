use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use fund_engine_core::risk::portfolio::{assess_portfolio_risk, LiquidityClass, Position};
use fund_engine_core::FundPolicy;

use super::envelope;
use crate::input;

/// Arguments for portfolio risk assessment
#[derive(Args)]
pub struct RiskArgs {
    /// Path to a JSON array of {amount, liquidity} positions
    #[arg(long)]
    pub input: Option<String>,

    /// Position as AMOUNT[:low|medium|high] (liquidity defaults to medium); repeatable
    #[arg(long = "position", value_parser = parse_position)]
    pub positions: Vec<Position>,
}

fn parse_position(s: &str) -> Result<Position, String> {
    let (amount, liquidity) = match s.split_once(':') {
        Some((a, l)) => (a, Some(l)),
        None => (s, None),
    };
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("Invalid amount '{amount}': {e}"))?;
    let liquidity = match liquidity.map(|l| l.trim().to_ascii_lowercase()).as_deref() {
        None => LiquidityClass::default(),
        Some("low") => LiquidityClass::Low,
        Some("medium") => LiquidityClass::Medium,
        Some("high") => LiquidityClass::High,
        Some(other) => return Err(format!("Unknown liquidity '{other}' (low|medium|high)")),
    };
    Position::new(amount, liquidity).map_err(|e| e.to_string())
}

pub fn run_risk(args: RiskArgs, policy: &FundPolicy) -> Result<Value, Box<dyn std::error::Error>> {
    // An empty book is valid, so no flags and no input means an empty portfolio.
    let positions: Vec<Position> = if args.input.is_none() && !args.positions.is_empty() {
        args.positions
    } else {
        input::read_request(args.input.as_deref())?.unwrap_or_default()
    };

    let start = Instant::now();
    let report = assess_portfolio_risk(&positions, &policy.risk)?;
    envelope(
        "Weighted concentration, liquidity and size risk score",
        &policy.risk,
        Vec::new(),
        start,
        report,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_position() {
        let p = parse_position("500000:High").unwrap();
        assert_eq!(p.amount, dec!(500000));
        assert_eq!(p.liquidity, LiquidityClass::High);

        let p = parse_position("1000").unwrap();
        assert_eq!(p.liquidity, LiquidityClass::Medium);

        assert!(parse_position("100:illiquid").is_err());
        assert!(parse_position("-5:low").is_err());
    }
}
