use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FundError;
use crate::types::*;
use crate::FundResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Subscription policy thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestmentPolicy {
    pub min_amount: Money,
    /// Cap on new capital accepted per calendar month; also the largest
    /// single subscription allowed.
    pub max_monthly_intake: Money,
    pub min_commitment_months: u32,
    pub currency: Currency,
}

impl Default for InvestmentPolicy {
    fn default() -> Self {
        InvestmentPolicy {
            min_amount: dec!(10_000),
            max_monthly_intake: dec!(2_000_000),
            min_commitment_months: 6,
            currency: Currency::USD,
        }
    }
}

/// The rule that rejected a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyRule {
    ExceedsMonthlyIntake,
    BelowMinimumCommitment,
    BelowMinimumInvestment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub approved: bool,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<PolicyRule>,
}

impl ValidationOutcome {
    fn approved() -> Self {
        ValidationOutcome {
            approved: true,
            reason: "Investment approved".into(),
            rule: None,
        }
    }

    fn rejected(rule: PolicyRule, reason: String) -> Self {
        ValidationOutcome {
            approved: false,
            reason,
            rule: Some(rule),
        }
    }
}

/// A dated subscription for monthly capacity checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeEntry {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIntake {
    pub year: i32,
    pub month: u32,
    pub subscriptions: usize,
    pub total: Money,
    pub remaining_capacity: Money,
    pub breached: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeCapacityReport {
    pub months: Vec<MonthlyIntake>,
    pub max_monthly_intake: Money,
    pub breached_months: usize,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Gate a single subscription against the policy.
///
/// Rules run in a fixed order and the first failure decides the reason:
/// monthly intake cap, minimum commitment, minimum amount. Rejection is a
/// normal outcome, so this never errors.
pub fn validate_investment(
    amount: Money,
    commitment_months: u32,
    policy: &InvestmentPolicy,
) -> ValidationOutcome {
    let outcome = if amount > policy.max_monthly_intake {
        ValidationOutcome::rejected(
            PolicyRule::ExceedsMonthlyIntake,
            format!(
                "Exceeds monthly intake limit of {}",
                format_money(policy.max_monthly_intake, &policy.currency)
            ),
        )
    } else if commitment_months < policy.min_commitment_months {
        ValidationOutcome::rejected(
            PolicyRule::BelowMinimumCommitment,
            format!(
                "Below minimum commitment period of {} months",
                policy.min_commitment_months
            ),
        )
    } else if amount < policy.min_amount {
        ValidationOutcome::rejected(
            PolicyRule::BelowMinimumInvestment,
            format!(
                "Minimum investment is {}",
                format_money(policy.min_amount, &policy.currency)
            ),
        )
    } else {
        ValidationOutcome::approved()
    };

    if !outcome.approved {
        tracing::debug!(%amount, commitment_months, reason = %outcome.reason, "investment rejected");
    }
    outcome
}

// ---------------------------------------------------------------------------
// Monthly capacity
// ---------------------------------------------------------------------------

/// Bucket dated subscriptions by calendar month and compare each month's
/// total with `max_monthly_intake`. Months come back in chronological order;
/// months with no subscriptions are omitted.
pub fn check_monthly_intake(
    entries: &[IntakeEntry],
    policy: &InvestmentPolicy,
) -> FundResult<IntakeCapacityReport> {
    let cap = policy.max_monthly_intake;
    let mut buckets: BTreeMap<(i32, u32), (usize, Money)> = BTreeMap::new();

    for entry in entries {
        if entry.amount < Decimal::ZERO {
            return Err(FundError::InvalidAmount {
                amount: entry.amount,
                reason: format!("Subscription dated {} cannot be negative", entry.date),
            });
        }
        let bucket = buckets
            .entry((entry.date.year(), entry.date.month()))
            .or_insert((0, Decimal::ZERO));
        bucket.0 += 1;
        bucket.1 = bucket
            .1
            .checked_add(entry.amount)
            .ok_or_else(|| FundError::Overflow {
                context: format!(
                    "intake total for {}-{:02}",
                    entry.date.year(),
                    entry.date.month()
                ),
            })?;
    }

    let months: Vec<MonthlyIntake> = buckets
        .into_iter()
        .map(|((year, month), (subscriptions, total))| MonthlyIntake {
            year,
            month,
            subscriptions,
            total,
            // total >= 0, so a failed subtraction is below zero anyway
            remaining_capacity: cap
                .checked_sub(total)
                .map_or(Decimal::ZERO, |r| r.max(Decimal::ZERO)),
            breached: total > cap,
        })
        .collect();

    let breached_months = months.iter().filter(|m| m.breached).count();
    if breached_months > 0 {
        tracing::debug!(breached_months, "monthly intake cap exceeded");
    }

    Ok(IntakeCapacityReport {
        months,
        max_monthly_intake: cap,
        breached_months,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(y: i32, m: u32, d: u32, amount: Decimal) -> IntakeEntry {
        IntakeEntry {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            amount,
            investor: None,
        }
    }

    #[test]
    fn test_exceeds_monthly_intake() {
        let out = validate_investment(dec!(2_500_000), 12, &InvestmentPolicy::default());
        assert!(!out.approved);
        assert_eq!(out.rule, Some(PolicyRule::ExceedsMonthlyIntake));
        assert_eq!(out.reason, "Exceeds monthly intake limit of $2,000,000");
    }

    #[test]
    fn test_below_minimum_investment() {
        let out = validate_investment(dec!(5_000), 12, &InvestmentPolicy::default());
        assert!(!out.approved);
        assert_eq!(out.reason, "Minimum investment is $10,000");
    }

    #[test]
    fn test_below_minimum_commitment() {
        let out = validate_investment(dec!(50_000), 3, &InvestmentPolicy::default());
        assert!(!out.approved);
        assert_eq!(out.reason, "Below minimum commitment period of 6 months");
    }

    #[test]
    fn test_approved() {
        let out = validate_investment(dec!(50_000), 24, &InvestmentPolicy::default());
        assert!(out.approved);
        assert_eq!(out.reason, "Investment approved");
        assert_eq!(out.rule, None);
    }

    #[test]
    fn test_rule_order_intake_before_commitment() {
        // Fails all three rules; the intake cap is checked first
        let out = validate_investment(dec!(3_000_000), 1, &InvestmentPolicy::default());
        assert_eq!(out.rule, Some(PolicyRule::ExceedsMonthlyIntake));

        // Fails commitment and minimum amount; commitment wins
        let out = validate_investment(dec!(500), 1, &InvestmentPolicy::default());
        assert_eq!(out.rule, Some(PolicyRule::BelowMinimumCommitment));
    }

    #[test]
    fn test_boundaries_inclusive() {
        let policy = InvestmentPolicy::default();
        assert!(validate_investment(dec!(2_000_000), 6, &policy).approved);
        assert!(validate_investment(dec!(10_000), 6, &policy).approved);
    }

    #[test]
    fn test_currency_in_reason() {
        let policy = InvestmentPolicy {
            currency: Currency::GBP,
            ..InvestmentPolicy::default()
        };
        let out = validate_investment(dec!(100), 12, &policy);
        assert_eq!(out.reason, "Minimum investment is £10,000");
    }

    #[test]
    fn test_monthly_buckets() {
        let entries = vec![
            entry(2024, 3, 2, dec!(1_500_000)),
            entry(2024, 1, 15, dec!(10_000)),
            entry(2024, 3, 28, dec!(750_000)),
            entry(2024, 1, 31, dec!(15_000)),
        ];
        let report = check_monthly_intake(&entries, &InvestmentPolicy::default()).unwrap();

        assert_eq!(report.months.len(), 2);
        let jan = &report.months[0];
        assert_eq!((jan.year, jan.month), (2024, 1));
        assert_eq!(jan.subscriptions, 2);
        assert_eq!(jan.total, dec!(25_000));
        assert_eq!(jan.remaining_capacity, dec!(1_975_000));
        assert!(!jan.breached);

        let mar = &report.months[1];
        assert_eq!(mar.total, dec!(2_250_000));
        assert_eq!(mar.remaining_capacity, Decimal::ZERO);
        assert!(mar.breached);
        assert_eq!(report.breached_months, 1);
    }

    #[test]
    fn test_same_month_different_year_not_merged() {
        let entries = vec![entry(2023, 6, 1, dec!(100)), entry(2024, 6, 1, dec!(100))];
        let report = check_monthly_intake(&entries, &InvestmentPolicy::default()).unwrap();
        assert_eq!(report.months.len(), 2);
    }

    #[test]
    fn test_negative_entry_rejected() {
        let entries = vec![entry(2024, 6, 1, dec!(-1))];
        assert!(check_monthly_intake(&entries, &InvestmentPolicy::default()).is_err());
    }

    #[test]
    fn test_empty_entries() {
        let report = check_monthly_intake(&[], &InvestmentPolicy::default()).unwrap();
        assert!(report.months.is_empty());
        assert_eq!(report.breached_months, 0);
    }

    #[test]
    fn test_intake_total_overflow_is_error() {
        let big = dec!(50_000_000_000_000_000_000_000_000_000);
        let entries = vec![entry(2024, 6, 3, big), entry(2024, 6, 20, big)];
        match check_monthly_intake(&entries, &InvestmentPolicy::default()) {
            Err(FundError::Overflow { context }) => assert_eq!(context, "intake total for 2024-06"),
            other => panic!("Expected Overflow, got: {other:?}"),
        }
    }
}
