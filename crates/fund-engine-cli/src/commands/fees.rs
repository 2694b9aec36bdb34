use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;

use fund_engine_core::fees::commission::CommissionClass;
use fund_engine_core::FundPolicy;

use super::envelope;

/// Arguments for carry tier lookup
#[derive(Args)]
pub struct TierArgs {
    /// Investment amount
    #[arg(long)]
    pub amount: Decimal,
}

/// Arguments for commission quotes
#[derive(Args)]
pub struct CommissionArgs {
    /// Subscription amount
    #[arg(long)]
    pub amount: Decimal,

    /// Commission class
    #[arg(long, value_enum, default_value = "standard")]
    pub class: CommissionClassArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CommissionClassArg {
    Standard,
    Premium,
}

impl From<CommissionClassArg> for CommissionClass {
    fn from(arg: CommissionClassArg) -> Self {
        match arg {
            CommissionClassArg::Standard => CommissionClass::Standard,
            CommissionClassArg::Premium => CommissionClass::Premium,
        }
    }
}

pub fn run_tier(args: TierArgs, policy: &FundPolicy) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let tier = policy.tiers.resolve_tier(args.amount)?.clone();
    envelope(
        "Carry tier lookup (upper bound inclusive)",
        &serde_json::json!({ "amount": args.amount.to_string() }),
        Vec::new(),
        start,
        tier,
    )
}

pub fn run_tiers(policy: &FundPolicy) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    envelope(
        "Carry tier schedule",
        &serde_json::json!({ "tiers": policy.tiers.tiers().len() }),
        Vec::new(),
        start,
        policy.tiers.tiers().to_vec(),
    )
}

pub fn run_commission(
    args: CommissionArgs,
    policy: &FundPolicy,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let quote = policy.commission.quote(args.amount, args.class.into())?;
    envelope(
        "Upfront commission on subscribed capital",
        &serde_json::json!({
            "standard_rate": policy.commission.standard.to_string(),
            "premium_rate": policy.commission.premium.to_string(),
        }),
        Vec::new(),
        start,
        quote,
    )
}
