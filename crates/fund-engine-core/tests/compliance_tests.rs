use chrono::NaiveDate;
use fund_engine_core::compliance::intake::{
    check_monthly_intake, validate_investment, IntakeEntry, InvestmentPolicy, PolicyRule,
};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

// ===========================================================================
// Subscription policy
// ===========================================================================

#[test]
fn test_validate_over_intake_limit() {
    let out = validate_investment(dec!(2500000), 12, &InvestmentPolicy::default());
    assert!(!out.approved);
    assert!(out.reason.contains("monthly intake limit"), "{}", out.reason);
}

#[test]
fn test_validate_below_minimum_investment() {
    let out = validate_investment(dec!(5000), 12, &InvestmentPolicy::default());
    assert!(!out.approved);
    assert!(out.reason.contains("Minimum investment"), "{}", out.reason);
    assert_eq!(out.rule, Some(PolicyRule::BelowMinimumInvestment));
}

#[test]
fn test_validate_below_minimum_commitment() {
    let out = validate_investment(dec!(50000), 3, &InvestmentPolicy::default());
    assert!(!out.approved);
    assert!(out.reason.contains("minimum commitment"), "{}", out.reason);
}

#[test]
fn test_validate_approved() {
    let out = validate_investment(dec!(50000), 24, &InvestmentPolicy::default());
    assert!(out.approved);
    assert_eq!(out.reason, "Investment approved");
}

#[test]
fn test_validate_custom_policy() {
    let policy = InvestmentPolicy {
        min_amount: dec!(100_000),
        max_monthly_intake: dec!(500_000),
        min_commitment_months: 12,
        ..InvestmentPolicy::default()
    };
    assert_eq!(
        validate_investment(dec!(600_000), 24, &policy).reason,
        "Exceeds monthly intake limit of $500,000"
    );
    assert_eq!(
        validate_investment(dec!(200_000), 11, &policy).reason,
        "Below minimum commitment period of 12 months"
    );
    assert_eq!(
        validate_investment(dec!(99_999), 12, &policy).reason,
        "Minimum investment is $100,000"
    );
}

#[test]
fn test_validate_is_repeatable() {
    let policy = InvestmentPolicy::default();
    assert_eq!(
        validate_investment(dec!(7500), 2, &policy),
        validate_investment(dec!(7500), 2, &policy)
    );
}

// ---------------------------------------------------------------------------
// Monthly intake capacity
// ---------------------------------------------------------------------------

#[test]
fn test_monthly_intake_from_json() {
    let entries: Vec<IntakeEntry> = serde_json::from_str(
        r#"[
            {"date": "2024-01-05", "amount": 10000, "investor": "A"},
            {"date": "2024-02-10", "amount": "1999999"},
            {"date": "2024-02-20", "amount": 2}
        ]"#,
    )
    .unwrap();
    let report = check_monthly_intake(&entries, &InvestmentPolicy::default()).unwrap();

    assert_eq!(report.months.len(), 2);
    assert_eq!(report.months[1].total, dec!(2000001));
    assert!(report.months[1].breached);
    assert_eq!(report.breached_months, 1);
}

#[test]
fn test_monthly_intake_at_cap_not_breached() {
    let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let entries = vec![IntakeEntry {
        date,
        amount: dec!(2_000_000),
        investor: None,
    }];
    let report = check_monthly_intake(&entries, &InvestmentPolicy::default()).unwrap();
    assert!(!report.months[0].breached);
    assert_eq!(report.months[0].remaining_capacity, dec!(0));
}
