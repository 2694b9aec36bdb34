use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::FundError;
use crate::fees::tiers::TierSchedule;
use crate::types::*;
use crate::FundResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    /// 1-based year index
    pub year: u32,
    /// Carry revenue attributed to this year
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub yearly_returns: Vec<YearlyReturn>,
    /// Sum of `yearly_returns`
    pub total_return: Money,
    /// Geometric growth of `total_return / amount` over the horizon
    pub irr: Rate,
    pub carry_rate: Rate,
    pub tier_label: String,
}

/// Request shape used by the CLI and bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub amount: Money,
    pub years: u32,
    pub annual_return_rate: Rate,
}

/// Projects carry revenue for a subscription using a fixed tier schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnProjector {
    schedule: TierSchedule,
}

// ---------------------------------------------------------------------------
// Main calculation
// ---------------------------------------------------------------------------

impl ReturnProjector {
    pub fn new(schedule: TierSchedule) -> Self {
        ReturnProjector { schedule }
    }

    pub fn schedule(&self) -> &TierSchedule {
        &self.schedule
    }

    /// Project yearly carry revenue, total and implied IRR.
    ///
    /// Year `y` earns `amount * (1 + annual_return_rate)^y * carry_rate`,
    /// where the carry rate comes from the tier `amount` falls into. The IRR
    /// is `(total / amount)^(1 / years) - 1`. Carry is taken on compounded
    /// notional rather than on profit over principal, so the IRR compounds
    /// growth twice; this matches the published fund figures.
    pub fn project(
        &self,
        amount: Money,
        years: u32,
        annual_return_rate: Rate,
    ) -> FundResult<ProjectionResult> {
        validate_projection(amount, years, annual_return_rate)?;

        let tier = self.schedule.resolve_tier(amount)?;
        let carry_rate = tier.rate;
        let growth = Decimal::ONE + annual_return_rate;

        let mut yearly_returns: Vec<YearlyReturn> = Vec::with_capacity(years as usize);
        let mut total_return = Decimal::ZERO;

        for year in 1..=years {
            let compound_factor =
                growth
                    .checked_powu(u64::from(year))
                    .ok_or_else(|| FundError::Overflow {
                        context: format!("compound factor for year {year}"),
                    })?;
            let year_return = amount
                .checked_mul(compound_factor)
                .and_then(|v| v.checked_mul(carry_rate))
                .ok_or_else(|| FundError::Overflow {
                    context: format!("carry revenue for year {year}"),
                })?;
            total_return = total_return
                .checked_add(year_return)
                .ok_or_else(|| FundError::Overflow {
                    context: "total return".into(),
                })?;
            yearly_returns.push(YearlyReturn {
                year,
                amount: year_return,
            });
        }

        let irr = implied_irr(total_return, amount, years)?;

        Ok(ProjectionResult {
            yearly_returns,
            total_return,
            irr,
            carry_rate,
            tier_label: tier.label.clone(),
        })
    }

    pub fn project_input(&self, input: &ProjectionInput) -> FundResult<ProjectionResult> {
        self.project(input.amount, input.years, input.annual_return_rate)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_projection(amount: Money, years: u32, annual_return_rate: Rate) -> FundResult<()> {
    if amount <= Decimal::ZERO {
        return Err(FundError::InvalidAmount {
            amount,
            reason: "Investment amount must be greater than zero".into(),
        });
    }
    if years == 0 {
        return Err(FundError::InvalidDuration {
            years,
            reason: "Projection horizon must be at least 1 year".into(),
        });
    }
    if annual_return_rate <= -Decimal::ONE {
        return Err(FundError::InvalidInput {
            field: "annual_return_rate".into(),
            reason: "Annual return must be greater than -100%".into(),
        });
    }
    Ok(())
}

fn implied_irr(total_return: Money, amount: Money, years: u32) -> FundResult<Rate> {
    let multiple = total_return
        .checked_div(amount)
        .ok_or_else(|| FundError::Overflow {
            context: "IRR multiple".into(),
        })?;
    if multiple.is_zero() {
        // 0^(1/n) = 0
        return Ok(-Decimal::ONE);
    }
    let exponent = Decimal::ONE / Decimal::from(years);
    let root = multiple
        .checked_powd(exponent)
        .ok_or_else(|| FundError::Overflow {
            context: "IRR root".into(),
        })?;
    Ok(root - Decimal::ONE)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
