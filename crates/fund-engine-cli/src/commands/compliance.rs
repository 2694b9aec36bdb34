use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use fund_engine_core::compliance::intake::{self, IntakeEntry};
use fund_engine_core::FundPolicy;

use super::envelope;
use crate::input;

/// Arguments for subscription validation
#[derive(Args)]
pub struct ValidateArgs {
    /// Subscription amount
    #[arg(long)]
    pub amount: Decimal,

    /// Committed holding period in months
    #[arg(long)]
    pub commitment_months: u32,
}

/// Arguments for the monthly intake capacity check
#[derive(Args)]
pub struct IntakeArgs {
    /// Path to a JSON array of {date, amount, investor?} entries
    #[arg(long)]
    pub input: Option<String>,

    /// Subscription as DATE:AMOUNT (e.g. 2024-03-15:250000); repeatable
    #[arg(long = "entry", value_parser = parse_entry)]
    pub entries: Vec<IntakeEntry>,
}

fn parse_entry(s: &str) -> Result<IntakeEntry, String> {
    let (date, amount) = s
        .split_once(':')
        .ok_or_else(|| format!("Expected DATE:AMOUNT, got '{s}'"))?;
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{date}': {e}"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|e| format!("Invalid amount '{amount}': {e}"))?;
    Ok(IntakeEntry {
        date,
        amount,
        investor: None,
    })
}

pub fn run_validate(
    args: ValidateArgs,
    policy: &FundPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let outcome = intake::validate_investment(args.amount, args.commitment_months, &policy.investment);
    let warnings = if outcome.approved {
        Vec::new()
    } else {
        vec![format!("Subscription rejected: {}", outcome.reason)]
    };
    envelope(
        "Subscription policy gate (intake cap, commitment, minimum)",
        &policy.investment,
        warnings,
        start,
        outcome,
    )
}

pub fn run_intake(
    args: IntakeArgs,
    policy: &FundPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let entries: Vec<IntakeEntry> = if args.input.is_none() && !args.entries.is_empty() {
        args.entries
    } else {
        input::read_request(args.input.as_deref())?
            .ok_or("Provide --entry DATE:AMOUNT, --input <file> or JSON on stdin")?
    };

    let start = Instant::now();
    let report = intake::check_monthly_intake(&entries, &policy.investment)?;
    let warnings = report
        .months
        .iter()
        .filter(|m| m.breached)
        .map(|m| {
            format!(
                "{}-{:02}: intake {} exceeds cap {}",
                m.year, m.month, m.total, report.max_monthly_intake
            )
        })
        .collect();
    envelope(
        "Calendar-month intake totals against the monthly cap",
        &serde_json::json!({
            "entries": entries.len(),
            "max_monthly_intake": policy.investment.max_monthly_intake.to_string(),
        }),
        warnings,
        start,
        report,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_entry() {
        let entry = parse_entry("2024-03-15:250000").unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(entry.amount, dec!(250000));
        assert!(parse_entry("2024-03-15").is_err());
        assert!(parse_entry("15/03/2024:100").is_err());
    }
}
