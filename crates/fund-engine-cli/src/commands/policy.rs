use serde_json::Value;

use fund_engine_core::FundPolicy;

/// The effective policy after `--config` overrides, as plain JSON.
pub fn run_policy(policy: &FundPolicy) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(policy)?)
}

