use fund_engine_core::risk::portfolio::{
    assess_portfolio_risk, LiquidityClass, PortfolioRiskAssessor, Position, RiskLimits,
    RiskPolicy, RiskStatus,
};
use fund_engine_core::FundPolicy;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Portfolio risk assessment
// ===========================================================================

fn position(amount: Decimal, liquidity: LiquidityClass) -> Position {
    Position { amount, liquidity }
}

#[test]
fn test_empty_portfolio_report() {
    let report = PortfolioRiskAssessor::new(RiskLimits::default()).assess(&[]);
    assert_eq!(report.risk_status, RiskStatus::NoPortfolio);
    assert_eq!(report.total_aum, Decimal::ZERO);
    assert_eq!(report.concentration_ratio, Decimal::ZERO);
    assert_eq!(report.liquidity_ratio, Decimal::ZERO);
    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].contains("diversified"));
}

#[test]
fn test_single_high_liquidity_position() {
    let report = PortfolioRiskAssessor::new(RiskLimits::default())
        .assess(&[position(dec!(100000), LiquidityClass::High)]);

    assert_eq!(report.concentration_ratio, dec!(1.0));
    assert_eq!(report.liquidity_ratio, dec!(1.0));
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("concentration")));
    assert!(!report.recommendations.iter().any(|r| r.contains("liquidity")));
}

#[test]
fn test_score_bounded() {
    let assessor = PortfolioRiskAssessor::default();
    let books = vec![
        vec![position(dec!(1), LiquidityClass::Low)],
        vec![position(dec!(1_000_000_000), LiquidityClass::Low)],
        vec![
            position(dec!(5), LiquidityClass::High),
            position(dec!(5), LiquidityClass::High),
            position(dec!(5), LiquidityClass::High),
        ],
    ];
    for book in books {
        let report = assessor.assess(&book);
        assert!(report.risk_score >= Decimal::ZERO && report.risk_score <= Decimal::ONE);
    }
}

#[test]
fn test_recommendation_order_fixed() {
    let report = PortfolioRiskAssessor::default().assess(&[
        position(dec!(20_000_000), LiquidityClass::Medium),
        position(dec!(1_000_000), LiquidityClass::High),
    ]);
    assert_eq!(report.recommendations.len(), 3);
    assert!(report.recommendations[0].contains("concentration"));
    assert!(report.recommendations[1].contains("liquidity"));
    assert!(report.recommendations[2].contains("overall"));
    // 0.4 + 0.3 * (1 - (1/21) / 0.2) + 0.15 ~= 0.7786
    assert_eq!(report.risk_status, RiskStatus::High);
}

#[test]
fn test_only_high_liquidity_counts() {
    let report = PortfolioRiskAssessor::default().assess(&[
        position(dec!(100), LiquidityClass::High),
        position(dec!(100), LiquidityClass::Medium),
        position(dec!(100), LiquidityClass::Low),
        position(dec!(100), LiquidityClass::Medium),
    ]);
    assert_eq!(report.liquidity_ratio, dec!(0.25));
    assert_eq!(report.concentration_ratio, dec!(0.25));
}

#[test]
fn test_validated_entry_point_matches_assessor() {
    let positions: Vec<Position> = serde_json::from_str(
        r#"[
            {"amount": 300000, "liquidity": "high"},
            {"amount": 200000, "liquidity": "low"},
            {"amount": 500000}
        ]"#,
    )
    .unwrap();
    let via_fn = assess_portfolio_risk(&positions, &RiskPolicy::default()).unwrap();
    let via_policy = FundPolicy::default().risk_assessor().assess(&positions);
    assert_eq!(via_fn, via_policy);
    assert_eq!(via_fn.concentration_ratio, dec!(0.5));
    assert_eq!(via_fn.liquidity_ratio, dec!(0.3));
}
