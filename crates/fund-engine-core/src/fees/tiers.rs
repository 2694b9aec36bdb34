use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FundError;
use crate::types::*;
use crate::FundResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One carry bracket. An amount belongs to the first tier whose
/// `upper_bound` is greater than or equal to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierDefinition {
    /// Inclusive upper bound of the bracket. Ignored for the last tier,
    /// which is open-ended.
    pub upper_bound: Money,
    /// Carry charged on projected returns (0.10 = 10%)
    pub rate: Rate,
    pub label: String,
    #[serde(default)]
    pub description: String,
}

impl TierDefinition {
    pub fn new(upper_bound: Money, rate: Rate, label: &str, description: &str) -> Self {
        TierDefinition {
            upper_bound,
            rate,
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

/// Ordered carry schedule. Always non-empty with strictly ascending bounds;
/// deserialisation goes through the same validation as [`TierSchedule::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TierDefinition>", into = "Vec<TierDefinition>")]
pub struct TierSchedule {
    tiers: Vec<TierDefinition>,
}

impl Default for TierSchedule {
    /// Entry 10% up to 250k, Growth 15% up to 500k, Premium 20% above.
    fn default() -> Self {
        TierSchedule {
            tiers: vec![
                TierDefinition::new(
                    dec!(250_000),
                    dec!(0.10),
                    "Entry Tier",
                    "Entry level institutional access",
                ),
                TierDefinition::new(
                    dec!(500_000),
                    dec!(0.15),
                    "Growth Tier",
                    "Mid-tier scaling benefits",
                ),
                TierDefinition::new(
                    dec!(2_000_000),
                    dec!(0.20),
                    "Premium Tier",
                    "Premium tier optimization",
                ),
            ],
        }
    }
}

impl TryFrom<Vec<TierDefinition>> for TierSchedule {
    type Error = FundError;

    fn try_from(tiers: Vec<TierDefinition>) -> Result<Self, Self::Error> {
        TierSchedule::new(tiers)
    }
}

impl From<TierSchedule> for Vec<TierDefinition> {
    fn from(schedule: TierSchedule) -> Self {
        schedule.tiers
    }
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

impl TierSchedule {
    pub fn new(tiers: Vec<TierDefinition>) -> FundResult<Self> {
        validate_tiers(&tiers)?;
        Ok(TierSchedule { tiers })
    }

    /// Tiers in ascending bound order.
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// Resolve the tier an amount falls into.
    ///
    /// Bounds are inclusive on the upper side: an amount equal to a boundary
    /// stays in the lower tier. Amounts beyond every bound land in the last
    /// tier.
    pub fn resolve_tier(&self, amount: Money) -> FundResult<&TierDefinition> {
        if amount < Decimal::ZERO {
            return Err(FundError::InvalidAmount {
                amount,
                reason: "Investment amount cannot be negative".into(),
            });
        }

        let tier = self
            .tiers
            .iter()
            .find(|t| amount <= t.upper_bound)
            .or_else(|| self.tiers.last())
            .ok_or_else(|| FundError::InsufficientData("Tier schedule is empty".into()))?;

        tracing::debug!(%amount, tier = %tier.label, rate = %tier.rate, "resolved carry tier");
        Ok(tier)
    }

    /// Carry rate for an amount.
    pub fn carry_rate(&self, amount: Money) -> FundResult<Rate> {
        self.resolve_tier(amount).map(|t| t.rate)
    }
}

fn validate_tiers(tiers: &[TierDefinition]) -> FundResult<()> {
    if tiers.is_empty() {
        return Err(FundError::InvalidInput {
            field: "tiers".into(),
            reason: "At least one tier is required".into(),
        });
    }

    for (i, tier) in tiers.iter().enumerate() {
        if tier.rate < Decimal::ZERO || tier.rate > Decimal::ONE {
            return Err(FundError::InvalidInput {
                field: format!("tiers[{i}].rate"),
                reason: "Carry rate must be between 0 and 1".into(),
            });
        }
        if tier.upper_bound < Decimal::ZERO {
            return Err(FundError::InvalidInput {
                field: format!("tiers[{i}].upper_bound"),
                reason: "Tier bound cannot be negative".into(),
            });
        }
        if i > 0 && tier.upper_bound <= tiers[i - 1].upper_bound {
            return Err(FundError::InvalidInput {
                field: format!("tiers[{i}].upper_bound"),
                reason: "Tier bounds must be strictly ascending".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
