pub mod compliance;
pub mod fees;
pub mod policy;
pub mod projection;
pub mod risk;

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use fund_engine_core::with_metadata;

/// Wrap a calculator result in the standard output envelope, timing from `start`.
pub(crate) fn envelope<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    start: Instant,
    result: T,
) -> Result<Value, Box<dyn std::error::Error>> {
    let elapsed = start.elapsed().as_micros() as u64;
    let output = with_metadata(methodology, assumptions, warnings, elapsed, result);
    Ok(serde_json::to_value(output)?)
}
