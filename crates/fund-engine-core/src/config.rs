//! Every policy parameter of the fund in one serialisable bundle.
//!
//! All sections are optional when deserialising; omitted sections take the
//! published defaults, so a config file only needs to list overrides.

use serde::{Deserialize, Serialize};

#[cfg(feature = "compliance")]
use crate::compliance::intake::InvestmentPolicy;
#[cfg(feature = "fees")]
use crate::fees::{commission::CommissionSchedule, tiers::TierSchedule};
#[cfg(feature = "projection")]
use crate::projection::{
    returns::ReturnProjector,
    scenarios::{default_scenarios, ReturnScenario},
};
#[cfg(feature = "risk")]
use crate::risk::portfolio::{PortfolioRiskAssessor, RiskPolicy};
use crate::FundResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundPolicy {
    #[cfg(feature = "fees")]
    pub tiers: TierSchedule,
    #[cfg(feature = "fees")]
    pub commission: CommissionSchedule,
    #[cfg(feature = "projection")]
    pub scenarios: Vec<ReturnScenario>,
    #[cfg(feature = "compliance")]
    pub investment: InvestmentPolicy,
    #[cfg(feature = "risk")]
    pub risk: RiskPolicy,
}

impl Default for FundPolicy {
    fn default() -> Self {
        FundPolicy {
            #[cfg(feature = "fees")]
            tiers: TierSchedule::default(),
            #[cfg(feature = "fees")]
            commission: CommissionSchedule::default(),
            #[cfg(feature = "projection")]
            scenarios: default_scenarios(),
            #[cfg(feature = "compliance")]
            investment: InvestmentPolicy::default(),
            #[cfg(feature = "risk")]
            risk: RiskPolicy::default(),
        }
    }
}

impl FundPolicy {
    /// Parse a policy from JSON. Tier ordering is checked during parsing.
    pub fn from_json(json: &str) -> FundResult<Self> {
        let policy: FundPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Checks not already enforced by deserialisation.
    pub fn validate(&self) -> FundResult<()> {
        #[cfg(feature = "fees")]
        self.commission.validate()?;
        #[cfg(feature = "risk")]
        self.risk.validate()?;
        Ok(())
    }

    #[cfg(feature = "projection")]
    pub fn projector(&self) -> ReturnProjector {
        ReturnProjector::new(self.tiers.clone())
    }

    #[cfg(feature = "risk")]
    pub fn risk_assessor(&self) -> PortfolioRiskAssessor {
        PortfolioRiskAssessor::from(self.risk.clone())
    }
}

#[cfg(all(
    test,
    feature = "fees",
    feature = "projection",
    feature = "compliance",
    feature = "risk"
))]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_json_is_default() {
        let policy = FundPolicy::from_json("{}").unwrap();
        assert_eq!(policy, FundPolicy::default());
    }

    #[test]
    fn test_partial_override() {
        let policy = FundPolicy::from_json(
            r#"{"investment": {"min_amount": 25000}, "risk": {"limits": {"max_concentration": 0.5}}}"#,
        )
        .unwrap();
        assert_eq!(policy.investment.min_amount, dec!(25000));
        assert_eq!(policy.investment.min_commitment_months, 6);
        assert_eq!(policy.risk.limits.max_concentration, dec!(0.5));
        assert_eq!(policy.risk.limits.min_liquidity, dec!(0.20));
        assert_eq!(policy.tiers, TierSchedule::default());
    }

    #[test]
    fn test_invalid_risk_limits_rejected() {
        assert!(FundPolicy::from_json(r#"{"risk": {"limits": {"min_liquidity": 2}}}"#).is_err());
    }

    #[test]
    fn test_validate_covers_risk_policy() {
        let mut policy = FundPolicy::default();
        assert!(policy.validate().is_ok());
        policy.risk.weights.size_reference_aum = dec!(0);
        match policy.validate() {
            Err(crate::FundError::InvalidInput { field, .. }) => {
                assert_eq!(field, "weights.size_reference_aum")
            }
            other => panic!("Expected InvalidInput, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_commission_rejected() {
        assert!(FundPolicy::from_json(r#"{"commission": {"standard": -0.1, "premium": 0.02}}"#).is_err());
    }

    #[test]
    fn test_projector_uses_configured_tiers() {
        let policy = FundPolicy::from_json(
            r#"{"tiers": [{"upper_bound": 1000000, "rate": 0.05, "label": "Flat"}]}"#,
        )
        .unwrap();
        let result = policy.projector().project(dec!(100000), 1, dec!(0)).unwrap();
        assert_eq!(result.carry_rate, dec!(0.05));
        assert_eq!(result.tier_label, "Flat");
    }
}
