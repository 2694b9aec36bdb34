use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FundError;
use crate::types::*;
use crate::FundResult;

use super::returns::{ProjectionResult, ReturnProjector};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnScenario {
    pub name: String,
    pub annual_return: Rate,
}

impl ReturnScenario {
    pub fn new(name: &str, annual_return: Rate) -> Self {
        ReturnScenario {
            name: name.to_string(),
            annual_return,
        }
    }
}

/// Conservative 8%, Base Case 12%, Optimistic 16%, Bull Market 20%.
pub fn default_scenarios() -> Vec<ReturnScenario> {
    vec![
        ReturnScenario::new("Conservative", dec!(0.08)),
        ReturnScenario::new("Base Case", dec!(0.12)),
        ReturnScenario::new("Optimistic", dec!(0.16)),
        ReturnScenario::new("Bull Market", dec!(0.20)),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProjection {
    pub name: String,
    pub annual_return: Rate,
    pub projection: ProjectionResult,
}

/// Run the projector once per scenario, preserving input order.
pub fn run_scenarios(
    projector: &ReturnProjector,
    amount: Money,
    years: u32,
    scenarios: &[ReturnScenario],
) -> FundResult<Vec<ScenarioProjection>> {
    if scenarios.is_empty() {
        return Err(FundError::InsufficientData(
            "At least one return scenario is required".into(),
        ));
    }

    scenarios
        .iter()
        .map(|s| {
            let projection = projector.project(amount, years, s.annual_return)?;
            Ok(ScenarioProjection {
                name: s.name.clone(),
                annual_return: s.annual_return,
                projection,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenarios_ordered_by_return() {
        let projector = ReturnProjector::default();
        let out = run_scenarios(&projector, dec!(1_000_000), 4, &default_scenarios()).unwrap();

        assert_eq!(out.len(), 4);
        assert_eq!(out[0].name, "Conservative");
        assert_eq!(out[3].name, "Bull Market");
        for pair in out.windows(2) {
            assert!(pair[1].projection.total_return > pair[0].projection.total_return);
            assert!(pair[1].projection.irr > pair[0].projection.irr);
        }
    }

    #[test]
    fn test_base_case_matches_direct_projection() {
        let projector = ReturnProjector::default();
        let out = run_scenarios(&projector, dec!(75000), 3, &default_scenarios()).unwrap();
        let direct = projector.project(dec!(75000), 3, dec!(0.12)).unwrap();
        assert_eq!(out[1].projection, direct);
    }

    #[test]
    fn test_empty_scenarios_rejected() {
        let projector = ReturnProjector::default();
        assert!(matches!(
            run_scenarios(&projector, dec!(75000), 3, &[]),
            Err(FundError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_invalid_scenario_aborts() {
        let projector = ReturnProjector::default();
        let scenarios = vec![
            ReturnScenario::new("Fine", dec!(0.05)),
            ReturnScenario::new("Wipeout", dec!(-1.5)),
        ];
        assert!(run_scenarios(&projector, dec!(75000), 3, &scenarios).is_err());
    }
}
