use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FundError;
use crate::types::*;
use crate::FundResult;

const EMPTY_PORTFOLIO_ADVICE: &str = "Build initial portfolio with diversified investments";
const REDUCE_CONCENTRATION: &str = "Reduce portfolio concentration - consider diversification";
const INCREASE_LIQUIDITY: &str = "Increase liquidity buffer - add more liquid investments";
const REDUCE_OVERALL_RISK: &str = "Consider reducing overall portfolio risk";
const WITHIN_PARAMETERS: &str = "Portfolio risk profile is within acceptable parameters";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiquidityClass {
    Low,
    #[default]
    Medium,
    High,
}

/// One holding. Only `High` liquidity counts towards the liquidity ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub amount: Money,
    #[serde(default)]
    pub liquidity: LiquidityClass,
}

impl Position {
    pub fn new(amount: Money, liquidity: LiquidityClass) -> FundResult<Self> {
        if amount < Decimal::ZERO {
            return Err(FundError::InvalidAmount {
                amount,
                reason: "Position amount cannot be negative".into(),
            });
        }
        Ok(Position { amount, liquidity })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    /// Largest single position as a share of AUM
    pub max_concentration: Rate,
    /// Minimum share of AUM in highly liquid positions
    pub min_liquidity: Rate,
}

impl Default for RiskLimits {
    fn default() -> Self {
        RiskLimits {
            max_concentration: dec!(0.40),
            min_liquidity: dec!(0.20),
        }
    }
}

/// Weights of the composite score. The size factor is
/// `min(aum / size_reference_aum, 1) * size_scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskWeights {
    pub concentration: Rate,
    pub liquidity: Rate,
    pub size: Rate,
    pub size_reference_aum: Money,
    pub size_scale: Rate,
}

impl Default for RiskWeights {
    fn default() -> Self {
        RiskWeights {
            concentration: dec!(0.4),
            liquidity: dec!(0.3),
            size: dec!(0.3),
            size_reference_aum: dec!(10_000_000),
            size_scale: dec!(0.5),
        }
    }
}

/// Score cut-offs. A score below `low` is Low risk, below `moderate` is
/// Moderate, below `high` is High, anything else Critical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub low: Rate,
    pub moderate: Rate,
    pub high: Rate,
    /// Scores above this add the "reduce overall risk" recommendation
    pub reduce_risk: Rate,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            low: dec!(0.3),
            moderate: dec!(0.6),
            high: dec!(0.8),
            reduce_risk: dec!(0.7),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskStatus {
    NoPortfolio,
    Low,
    Moderate,
    High,
    Critical,
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskStatus::NoPortfolio => "No Portfolio",
            RiskStatus::Low => "Low Risk",
            RiskStatus::Moderate => "Moderate Risk",
            RiskStatus::High => "High Risk",
            RiskStatus::Critical => "Critical Risk",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub total_aum: Money,
    pub concentration_ratio: Rate,
    pub liquidity_ratio: Rate,
    pub risk_score: Rate,
    pub risk_status: RiskStatus,
    pub recommendations: Vec<String>,
}

impl RiskReport {
    fn empty() -> Self {
        RiskReport {
            total_aum: Decimal::ZERO,
            concentration_ratio: Decimal::ZERO,
            liquidity_ratio: Decimal::ZERO,
            risk_score: Decimal::ZERO,
            risk_status: RiskStatus::NoPortfolio,
            recommendations: vec![EMPTY_PORTFOLIO_ADVICE.to_string()],
        }
    }
}

/// Full risk policy as carried in configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskPolicy {
    pub limits: RiskLimits,
    pub weights: RiskWeights,
    pub thresholds: RiskThresholds,
}

// ---------------------------------------------------------------------------
// Assessor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioRiskAssessor {
    limits: RiskLimits,
    weights: RiskWeights,
    thresholds: RiskThresholds,
}

impl From<RiskPolicy> for PortfolioRiskAssessor {
    fn from(policy: RiskPolicy) -> Self {
        PortfolioRiskAssessor {
            limits: policy.limits,
            weights: policy.weights,
            thresholds: policy.thresholds,
        }
    }
}

impl PortfolioRiskAssessor {
    pub fn new(limits: RiskLimits) -> Self {
        PortfolioRiskAssessor {
            limits,
            ..Default::default()
        }
    }

    pub fn with_weights(mut self, weights: RiskWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Composite risk report for a set of positions. Total: an empty slice
    /// yields the "No Portfolio" report, and zero AUM yields zero ratios.
    pub fn assess(&self, positions: &[Position]) -> RiskReport {
        if positions.is_empty() {
            return RiskReport::empty();
        }

        // Saturating sums; assess_portfolio_risk rejects books that overflow
        let total_aum = positions
            .iter()
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.amount));
        let largest = positions
            .iter()
            .map(|p| p.amount)
            .max()
            .unwrap_or(Decimal::ZERO);
        let liquid = positions
            .iter()
            .filter(|p| p.liquidity == LiquidityClass::High)
            .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.amount));

        let (concentration_ratio, liquidity_ratio) = if total_aum > Decimal::ZERO {
            (largest / total_aum, liquid / total_aum)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

        let risk_score = self.risk_score(concentration_ratio, liquidity_ratio, total_aum);
        let risk_status = self.risk_status(risk_score);
        let recommendations =
            self.recommendations(risk_score, concentration_ratio, liquidity_ratio);

        tracing::debug!(
            positions = positions.len(),
            %total_aum,
            %risk_score,
            status = %risk_status,
            "assessed portfolio risk"
        );

        RiskReport {
            total_aum,
            concentration_ratio,
            liquidity_ratio,
            risk_score,
            risk_status,
            recommendations,
        }
    }

    fn risk_score(&self, concentration: Rate, liquidity: Rate, aum: Money) -> Rate {
        let limits = &self.limits;
        let w = &self.weights;

        let concentration_risk = if limits.max_concentration > Decimal::ZERO {
            (concentration / limits.max_concentration).min(Decimal::ONE)
        } else if concentration > Decimal::ZERO {
            Decimal::ONE
        } else {
            Decimal::ZERO
        };

        let liquidity_risk = if limits.min_liquidity > Decimal::ZERO {
            ((limits.min_liquidity - liquidity) / limits.min_liquidity).max(Decimal::ZERO)
        } else {
            Decimal::ZERO
        };

        // A quotient too large to represent saturates at 1
        let size_risk = aum
            .checked_div(w.size_reference_aum)
            .map_or(Decimal::ONE, |r| r.min(Decimal::ONE))
            * w.size_scale;

        let score = concentration_risk * w.concentration
            + liquidity_risk * w.liquidity
            + size_risk * w.size;

        score.max(Decimal::ZERO).min(Decimal::ONE)
    }

    fn risk_status(&self, score: Rate) -> RiskStatus {
        let t = &self.thresholds;
        if score < t.low {
            RiskStatus::Low
        } else if score < t.moderate {
            RiskStatus::Moderate
        } else if score < t.high {
            RiskStatus::High
        } else {
            RiskStatus::Critical
        }
    }

    fn recommendations(&self, score: Rate, concentration: Rate, liquidity: Rate) -> Vec<String> {
        let mut recs = Vec::new();

        if concentration > self.limits.max_concentration {
            recs.push(REDUCE_CONCENTRATION.to_string());
        }
        if liquidity < self.limits.min_liquidity {
            recs.push(INCREASE_LIQUIDITY.to_string());
        }
        if score > self.thresholds.reduce_risk {
            recs.push(REDUCE_OVERALL_RISK.to_string());
        }
        if recs.is_empty() {
            recs.push(WITHIN_PARAMETERS.to_string());
        }
        recs
    }
}

// ---------------------------------------------------------------------------
// Validated entry point
// ---------------------------------------------------------------------------

/// Validate positions and policy, then assess. Used by front ends that
/// deserialise untrusted input.
pub fn assess_portfolio_risk(
    positions: &[Position],
    policy: &RiskPolicy,
) -> FundResult<RiskReport> {
    policy.validate()?;
    for (i, p) in positions.iter().enumerate() {
        if p.amount < Decimal::ZERO {
            return Err(FundError::InvalidAmount {
                amount: p.amount,
                reason: format!("Position {i} amount cannot be negative"),
            });
        }
    }
    positions
        .iter()
        .try_fold(Decimal::ZERO, |acc, p| acc.checked_add(p.amount))
        .ok_or_else(|| FundError::Overflow {
            context: "total AUM".into(),
        })?;
    Ok(PortfolioRiskAssessor::from(policy.clone()).assess(positions))
}

impl RiskPolicy {
    /// Fractions in [0, 1], a positive reference AUM and ordered thresholds.
    pub fn validate(&self) -> FundResult<()> {
        validate_policy(self)
    }
}

fn validate_policy(policy: &RiskPolicy) -> FundResult<()> {
    let fractions = [
        ("limits.max_concentration", policy.limits.max_concentration),
        ("limits.min_liquidity", policy.limits.min_liquidity),
        ("weights.concentration", policy.weights.concentration),
        ("weights.liquidity", policy.weights.liquidity),
        ("weights.size", policy.weights.size),
        ("weights.size_scale", policy.weights.size_scale),
    ];
    for (field, value) in fractions {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(FundError::InvalidInput {
                field: field.into(),
                reason: "Must be between 0 and 1".into(),
            });
        }
    }
    if policy.weights.size_reference_aum <= Decimal::ZERO {
        return Err(FundError::InvalidInput {
            field: "weights.size_reference_aum".into(),
            reason: "Reference AUM must be greater than zero".into(),
        });
    }
    let t = &policy.thresholds;
    if !(t.low <= t.moderate && t.moderate <= t.high) {
        return Err(FundError::InvalidInput {
            field: "thresholds".into(),
            reason: "Thresholds must satisfy low <= moderate <= high".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
