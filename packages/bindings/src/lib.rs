use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use fund_engine_core::compliance::intake::{self, IntakeEntry};
use fund_engine_core::fees::commission::CommissionClass;
use fund_engine_core::projection::returns::ProjectionInput;
use fund_engine_core::projection::scenarios::{self, ReturnScenario};
use fund_engine_core::risk::portfolio::{self, Position};
use fund_engine_core::{with_metadata, FundPolicy, FundResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

/// Every request may carry a partial policy override; omitted sections use
/// the published defaults.
#[derive(Deserialize)]
struct Request<T> {
    #[serde(flatten)]
    body: T,
    #[serde(default)]
    policy: Option<FundPolicy>,
}

impl<T> Request<T> {
    fn policy(&self) -> FundResult<FundPolicy> {
        match &self.policy {
            Some(p) => {
                p.validate()?;
                Ok(p.clone())
            }
            None => Ok(FundPolicy::default()),
        }
    }
}

#[derive(Deserialize)]
struct AmountBody {
    amount: Decimal,
}

#[derive(Deserialize)]
struct CommissionBody {
    amount: Decimal,
    #[serde(default)]
    class: CommissionClass,
}

#[derive(Deserialize)]
struct ScenariosBody {
    amount: Decimal,
    years: u32,
    #[serde(default)]
    scenarios: Option<Vec<ReturnScenario>>,
}

#[derive(Deserialize)]
struct ValidateBody {
    amount: Decimal,
    commitment_months: u32,
}

#[derive(Deserialize)]
struct IntakeBody {
    entries: Vec<IntakeEntry>,
}

#[derive(Deserialize)]
struct RiskBody {
    positions: Vec<Position>,
}

fn parse<T: for<'de> Deserialize<'de>>(input_json: &str) -> NapiResult<Request<T>> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn respond<T: Serialize>(
    methodology: &str,
    start: Instant,
    result: T,
) -> NapiResult<String> {
    let output = with_metadata(
        methodology,
        &serde_json::Value::Null,
        Vec::new(),
        start.elapsed().as_micros() as u64,
        result,
    );
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

#[napi]
pub fn resolve_tier(input_json: String) -> NapiResult<String> {
    let req: Request<AmountBody> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let start = Instant::now();
    let tier = policy
        .tiers
        .resolve_tier(req.body.amount)
        .map_err(to_napi_error)?;
    respond("Carry tier lookup (upper bound inclusive)", start, tier)
}

#[napi]
pub fn quote_commission(input_json: String) -> NapiResult<String> {
    let req: Request<CommissionBody> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let start = Instant::now();
    let quote = policy
        .commission
        .quote(req.body.amount, req.body.class)
        .map_err(to_napi_error)?;
    respond("Upfront commission on subscribed capital", start, quote)
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

#[napi]
pub fn project_returns(input_json: String) -> NapiResult<String> {
    let req: Request<ProjectionInput> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let start = Instant::now();
    let result = policy
        .projector()
        .project_input(&req.body)
        .map_err(to_napi_error)?;
    respond("Tiered carry projection on compounded notional", start, result)
}

#[napi]
pub fn run_scenarios(input_json: String) -> NapiResult<String> {
    let req: Request<ScenariosBody> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let scenario_set = req.body.scenarios.as_ref().unwrap_or(&policy.scenarios);
    let start = Instant::now();
    let out = scenarios::run_scenarios(
        &policy.projector(),
        req.body.amount,
        req.body.years,
        scenario_set,
    )
    .map_err(to_napi_error)?;
    respond("Carry projection across annual return scenarios", start, out)
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_investment(input_json: String) -> NapiResult<String> {
    let req: Request<ValidateBody> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let start = Instant::now();
    let outcome = intake::validate_investment(
        req.body.amount,
        req.body.commitment_months,
        &policy.investment,
    );
    respond(
        "Subscription policy gate (intake cap, commitment, minimum)",
        start,
        outcome,
    )
}

#[napi]
pub fn check_monthly_intake(input_json: String) -> NapiResult<String> {
    let req: Request<IntakeBody> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let start = Instant::now();
    let report =
        intake::check_monthly_intake(&req.body.entries, &policy.investment).map_err(to_napi_error)?;
    respond(
        "Calendar-month intake totals against the monthly cap",
        start,
        report,
    )
}

// ---------------------------------------------------------------------------
// Risk
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_portfolio_risk(input_json: String) -> NapiResult<String> {
    let req: Request<RiskBody> = parse(&input_json)?;
    let policy = req.policy().map_err(to_napi_error)?;
    let start = Instant::now();
    let report =
        portfolio::assess_portfolio_risk(&req.body.positions, &policy.risk).map_err(to_napi_error)?;
    respond(
        "Weighted concentration, liquidity and size risk score",
        start,
        report,
    )
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

#[napi]
pub fn default_policy() -> NapiResult<String> {
    serde_json::to_string(&FundPolicy::default()).map_err(to_napi_error)
}

