use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FundError;
use crate::types::*;
use crate::FundResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionClass {
    #[default]
    Standard,
    Premium,
}

/// Upfront commission rates charged on subscribed capital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionSchedule {
    pub standard: Rate,
    pub premium: Rate,
}

impl Default for CommissionSchedule {
    fn default() -> Self {
        CommissionSchedule {
            standard: dec!(0.01),
            premium: dec!(0.02),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionQuote {
    pub amount: Money,
    pub class: CommissionClass,
    pub rate: Rate,
    pub commission: Money,
}

impl CommissionSchedule {
    pub fn new(standard: Rate, premium: Rate) -> FundResult<Self> {
        let schedule = CommissionSchedule { standard, premium };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> FundResult<()> {
        for (field, rate) in [("standard", self.standard), ("premium", self.premium)] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(FundError::InvalidInput {
                    field: format!("commission.{field}"),
                    reason: "Commission rate must be between 0 and 1".into(),
                });
            }
        }
        Ok(())
    }

    pub fn rate(&self, class: CommissionClass) -> Rate {
        match class {
            CommissionClass::Standard => self.standard,
            CommissionClass::Premium => self.premium,
        }
    }

    /// Commission due on a subscription of `amount`.
    pub fn quote(&self, amount: Money, class: CommissionClass) -> FundResult<CommissionQuote> {
        if amount < Decimal::ZERO {
            return Err(FundError::InvalidAmount {
                amount,
                reason: "Subscription amount cannot be negative".into(),
            });
        }
        let rate = self.rate(class);
        let commission = amount
            .checked_mul(rate)
            .ok_or_else(|| FundError::Overflow {
                context: "commission".into(),
            })?;
        Ok(CommissionQuote {
            amount,
            class,
            rate,
            commission,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_and_premium_rates() {
        let schedule = CommissionSchedule::default();
        let std_q = schedule.quote(dec!(15000), CommissionClass::Standard).unwrap();
        let prem_q = schedule.quote(dec!(15000), CommissionClass::Premium).unwrap();
        assert_eq!(std_q.commission, dec!(150));
        assert_eq!(prem_q.commission, dec!(300));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let schedule = CommissionSchedule::default();
        assert!(matches!(
            schedule.quote(dec!(-5), CommissionClass::Standard),
            Err(FundError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_invalid_rate_rejected() {
        match CommissionSchedule::new(dec!(0.01), dec!(1.2)) {
            Err(FundError::InvalidInput { field, .. }) => assert_eq!(field, "commission.premium"),
            other => panic!("Expected InvalidInput, got: {other:?}"),
        }
    }

    #[test]
    fn test_class_deserialises_snake_case() {
        let class: CommissionClass = serde_json::from_str("\"premium\"").unwrap();
        assert_eq!(class, CommissionClass::Premium);
    }
}
