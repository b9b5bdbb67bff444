//! Scenario projection
//!
//! Applies per-category percent adjustments to the current spend and projects
//! the resulting monthly balance over a horizon. Pure; no I/O.

use crate::error::AdvisorError;
use crate::models::{AdjustmentDetail, ScenarioInput, ScenarioResult, Simulation};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest projection accepted unless configured otherwise
pub const DEFAULT_MAX_HORIZON_MONTHS: u32 = 120;

/// Upper bound for any configured horizon limit (one hundred years)
pub const HORIZON_LIMIT_MONTHS: u32 = 1200;

/// Adjustments below this would drive a category's spend negative
const MIN_ADJUSTMENT_PERCENT: f64 = -100.0;

/// Relative size below which a net change counts as exact cancellation
const CANCELLATION_TOLERANCE: f64 = 1e-12;

/// Number of months projected forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Horizon(u32);

impl Horizon {
    pub fn new(months: u32) -> Result<Self> {
        Self::with_max(months, DEFAULT_MAX_HORIZON_MONTHS)
    }

    pub fn with_max(months: u32, max: u32) -> Result<Self> {
        if months == 0 || months > max {
            return Err(AdvisorError::UnsupportedHorizon { months, max });
        }
        Ok(Self(months))
    }

    pub fn months(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 month")
        } else {
            write!(f, "{} months", self.0)
        }
    }
}

/// Validate the input and compute the projected scenario
pub fn project(input: &ScenarioInput, max_horizon: u32) -> Result<ScenarioResult> {
    validate(input)?;
    let horizon = Horizon::with_max(input.projection_months, max_horizon)?;

    let adjustments = adjustment_details(input);
    let new_expenses = input.current_expenses + net_change(&adjustments);

    Ok(build_result(
        input.monthly_income,
        input.current_expenses,
        new_expenses,
        horizon,
        adjustments,
    ))
}

/// Rebuild a local result from a server-computed simulation
///
/// The server does not report per-category changes, so they are derived
/// from the request's adjustments against the request's breakdown.
pub fn from_simulation(simulation: &Simulation, input: &ScenarioInput) -> Result<ScenarioResult> {
    if !(simulation.monthly_income.is_finite() && simulation.monthly_income > 0.0) {
        return Err(AdvisorError::InvalidInput(format!(
            "backend simulation reported non-positive income {}",
            simulation.monthly_income
        )));
    }
    let horizon = Horizon::with_max(simulation.months, HORIZON_LIMIT_MONTHS)?;

    let adjustments = adjustment_details(input);

    Ok(build_result(
        simulation.monthly_income,
        simulation.current_expenses,
        simulation.projected_expenses,
        horizon,
        adjustments,
    ))
}

/// Per-category changes for the adjusted categories present in the breakdown,
/// largest change first with ties in category order
fn adjustment_details(input: &ScenarioInput) -> Vec<AdjustmentDetail> {
    let mut adjustments: Vec<AdjustmentDetail> = input
        .category_adjustments
        .iter()
        .filter_map(|(category, percent)| {
            input.category_breakdown.get(category).map(|amount| AdjustmentDetail {
                category: category.clone(),
                percent: *percent,
                change: amount * (percent / 100.0),
            })
        })
        .collect();

    adjustments.sort_by(|a, b| {
        b.change
            .abs()
            .total_cmp(&a.change.abs())
            .then_with(|| a.category.cmp(&b.category))
    });
    adjustments
}

/// Sum of the changes; float residue left by offsetting changes is snapped to zero
fn net_change(adjustments: &[AdjustmentDetail]) -> f64 {
    let net: f64 = adjustments.iter().map(|a| a.change).sum();
    let gross: f64 = adjustments.iter().map(|a| a.change.abs()).sum();
    if net.abs() <= gross * CANCELLATION_TOLERANCE {
        0.0
    } else {
        net
    }
}

fn build_result(
    monthly_income: f64,
    current_expenses: f64,
    new_expenses: f64,
    horizon: Horizon,
    adjustments: Vec<AdjustmentDetail>,
) -> ScenarioResult {
    let current_balance = monthly_income - current_expenses;
    let new_balance = monthly_income - new_expenses;
    let delta = new_balance - current_balance;
    let percent_change = if current_balance != 0.0 {
        delta / current_balance.abs() * 100.0
    } else {
        0.0
    };

    ScenarioResult {
        monthly_income,
        current_expenses,
        new_expenses,
        current_balance,
        new_balance,
        delta,
        percent_change,
        projected_total: new_balance * f64::from(horizon.months()),
        projection_months: horizon.months(),
        adjustments,
    }
}

fn validate(input: &ScenarioInput) -> Result<()> {
    if !input.monthly_income.is_finite() || input.monthly_income <= 0.0 {
        return Err(AdvisorError::InvalidInput(format!(
            "monthly_income must be a positive number, got {}",
            input.monthly_income
        )));
    }
    if !input.current_expenses.is_finite() || input.current_expenses < 0.0 {
        return Err(AdvisorError::InvalidInput(format!(
            "current_expenses must be a non-negative number, got {}",
            input.current_expenses
        )));
    }
    for (category, amount) in &input.category_breakdown {
        if !amount.is_finite() || *amount < 0.0 {
            return Err(AdvisorError::InvalidInput(format!(
                "category '{}' has invalid amount {}",
                category, amount
            )));
        }
    }
    for (category, percent) in &input.category_adjustments {
        if !percent.is_finite() || *percent < MIN_ADJUSTMENT_PERCENT {
            return Err(AdvisorError::InvalidInput(format!(
                "adjustment for '{}' must be at least {}%, got {}",
                category, MIN_ADJUSTMENT_PERCENT, percent
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{classify_result, Tier};
    use std::collections::BTreeMap;

    fn input(
        income: f64,
        expenses: f64,
        adjustments: &[(&str, f64)],
        breakdown: &[(&str, f64)],
        months: u32,
    ) -> ScenarioInput {
        ScenarioInput {
            monthly_income: income,
            current_expenses: expenses,
            category_adjustments: adjustments.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            category_breakdown: breakdown.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            projection_months: months,
        }
    }

    #[test]
    fn test_food_reduction_example() {
        let result = project(
            &input(20000.0, 15000.0, &[("food", -20.0)], &[("food", 5000.0)], 6),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        assert_eq!(result.new_expenses, 14000.0);
        assert_eq!(result.current_balance, 5000.0);
        assert_eq!(result.new_balance, 6000.0);
        assert_eq!(result.delta, 1000.0);
        assert_eq!(result.percent_change, 20.0);
        assert_eq!(result.projected_total, 36000.0);
        assert_eq!(result.new_savings_rate(), 30.0);
    }

    #[test]
    fn test_unknown_categories_are_ignored() {
        let result = project(
            &input(10000.0, 8000.0, &[("travel", 50.0)], &[("food", 3000.0)], 3),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        assert!(result.adjustments.is_empty());
        assert_eq!(result.delta, 0.0);
    }

    #[test]
    fn test_offsetting_adjustments_cancel_exactly() {
        let result = project(
            &input(
                10000.0,
                7000.0,
                &[("food", 10.0), ("fun", -10.0)],
                &[("food", 1234.56), ("fun", 1234.56)],
                12,
            ),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        assert_eq!(result.delta, 0.0);
        assert_eq!(result.adjustments.len(), 2);
    }

    #[test]
    fn test_float_residue_from_three_way_offset_is_neutral() {
        let result = project(
            &input(
                10000.0,
                6.0,
                &[("a", 10.0), ("b", 10.0), ("c", -10.0)],
                &[("a", 1.0), ("b", 2.0), ("c", 3.0)],
                6,
            ),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        assert_eq!(result.delta, 0.0);
        assert_eq!(classify_result(&result), Tier::Neutral);
    }

    #[test]
    fn test_sub_cent_increase_is_not_neutral() {
        let result = project(
            &input(10000.0, 5000.0, &[("food", 0.4)], &[("food", 1.0)], 3),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        assert!(result.delta < 0.0);
        assert_eq!(classify_result(&result), Tier::SlightlyNegative);
    }

    #[test]
    fn test_equal_changes_sort_by_category() {
        let req = input(
            10000.0,
            5000.0,
            &[("rent", -10.0), ("food", 10.0)],
            &[("rent", 1000.0), ("food", 1000.0)],
            3,
        );
        let local = project(&req, DEFAULT_MAX_HORIZON_MONTHS).unwrap();
        let order: Vec<&str> = local.adjustments.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(order, vec!["food", "rent"]);
    }

    #[test]
    fn test_adjustments_sorted_by_magnitude() {
        let result = project(
            &input(
                30000.0,
                20000.0,
                &[("food", -10.0), ("rent", 5.0), ("fun", -50.0)],
                &[("food", 4000.0), ("rent", 10000.0), ("fun", 2000.0)],
                6,
            ),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        let order: Vec<&str> = result.adjustments.iter().map(|a| a.category.as_str()).collect();
        assert_eq!(order, vec!["fun", "rent", "food"]);
    }

    #[test]
    fn test_zero_current_balance_gives_zero_percent() {
        let result = project(
            &input(10000.0, 10000.0, &[("food", -10.0)], &[("food", 2000.0)], 3),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap();

        assert_eq!(result.delta, 200.0);
        assert_eq!(result.percent_change, 0.0);
    }

    #[test]
    fn test_rejects_non_positive_income() {
        let err = project(&input(0.0, 100.0, &[], &[], 3), DEFAULT_MAX_HORIZON_MONTHS).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidInput(_)));

        let err = project(&input(f64::NAN, 100.0, &[], &[], 3), DEFAULT_MAX_HORIZON_MONTHS).unwrap_err();
        assert!(matches!(err, AdvisorError::InvalidInput(_)));
    }

    #[test]
    fn test_rejects_adjustment_below_minus_hundred() {
        let err = project(
            &input(10000.0, 5000.0, &[("food", -150.0)], &[("food", 1000.0)], 3),
            DEFAULT_MAX_HORIZON_MONTHS,
        )
        .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_horizon_bounds() {
        assert!(Horizon::new(1).is_ok());
        assert!(Horizon::new(120).is_ok());
        assert!(matches!(
            Horizon::new(0),
            Err(AdvisorError::UnsupportedHorizon { months: 0, max: 120 })
        ));
        assert!(Horizon::with_max(25, 24).is_err());
        assert_eq!(Horizon::new(9).unwrap().to_string(), "9 months");
    }

    #[test]
    fn test_from_simulation_uses_server_figures() {
        let simulation = Simulation {
            monthly_income: 20000.0,
            current_expenses: 15000.0,
            projected_expenses: 14000.0,
            current_monthly_balance: 5000.0,
            projected_monthly_balance: 6000.0,
            projected_total_balance: 72000.0,
            difference_vs_current: 1000.0,
            months: 12,
            category_breakdown: BTreeMap::new(),
        };
        let req = input(20000.0, 15000.0, &[("food", -20.0)], &[("food", 5000.0)], 12);

        let result = from_simulation(&simulation, &req).unwrap();
        assert_eq!(result.delta, 1000.0);
        assert_eq!(result.projected_total, 72000.0);
        assert_eq!(result.adjustments[0].change, -1000.0);
    }

    #[test]
    fn test_from_simulation_rejects_out_of_range_months() {
        let simulation = Simulation {
            monthly_income: 20000.0,
            current_expenses: 15000.0,
            projected_expenses: 15000.0,
            current_monthly_balance: 5000.0,
            projected_monthly_balance: 5000.0,
            projected_total_balance: 0.0,
            difference_vs_current: 0.0,
            months: 2_000_000_000,
            category_breakdown: BTreeMap::new(),
        };
        let req = input(20000.0, 15000.0, &[], &[], 12);

        let err = from_simulation(&simulation, &req).unwrap_err();
        assert!(matches!(
            err,
            AdvisorError::UnsupportedHorizon { max: HORIZON_LIMIT_MONTHS, .. }
        ));
    }
}
