//! Scenario Classifier
//!
//! Classifies a simulated outcome into one of seven severity tiers:
//! - Improvements: VeryPositive / Positive / SlightlyPositive
//! - No change: Neutral
//! - Deterioration: SlightlyNegative / Negative / Critical

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percent change at or above which a move counts as large
const MAJOR_CHANGE_PERCENT: f64 = 15.0;

/// Percent change at or above which a move counts as moderate
const MODERATE_CHANGE_PERCENT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    VeryPositive,
    Positive,
    SlightlyPositive,
    Neutral,
    SlightlyNegative,
    Negative,
    Critical,
}

impl Tier {
    pub const ALL: [Tier; 7] = [
        Tier::VeryPositive,
        Tier::Positive,
        Tier::SlightlyPositive,
        Tier::Neutral,
        Tier::SlightlyNegative,
        Tier::Negative,
        Tier::Critical,
    ];

    /// Severity rank: 0 is the best outcome, 6 the worst
    pub fn severity(&self) -> u8 {
        match self {
            Tier::VeryPositive => 0,
            Tier::Positive => 1,
            Tier::SlightlyPositive => 2,
            Tier::Neutral => 3,
            Tier::SlightlyNegative => 4,
            Tier::Negative => 5,
            Tier::Critical => 6,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Tier::VeryPositive => "Very Positive",
            Tier::Positive => "Positive",
            Tier::SlightlyPositive => "Slightly Positive",
            Tier::Neutral => "Neutral",
            Tier::SlightlyNegative => "Slightly Negative",
            Tier::Negative => "Negative",
            Tier::Critical => "Critical",
        };
        write!(f, "{}", s)
    }
}

/// Classify a scenario outcome
///
/// First match wins. A negative resulting balance is always Critical, however
/// small the relative change. Anything that is neither above nor below zero
/// (including NaN) is Neutral, so every input maps to exactly one tier.
/// `_monthly_income` does not take part in the decision.
pub fn classify(delta: f64, percent_change: f64, new_balance: f64, _monthly_income: f64) -> Tier {
    if delta > 0.0 {
        if percent_change >= MAJOR_CHANGE_PERCENT {
            Tier::VeryPositive
        } else if percent_change >= MODERATE_CHANGE_PERCENT {
            Tier::Positive
        } else {
            Tier::SlightlyPositive
        }
    } else if delta < 0.0 {
        let magnitude = percent_change.abs();
        if magnitude >= MAJOR_CHANGE_PERCENT || new_balance < 0.0 {
            Tier::Critical
        } else if magnitude >= MODERATE_CHANGE_PERCENT {
            Tier::Negative
        } else {
            Tier::SlightlyNegative
        }
    } else {
        Tier::Neutral
    }
}

/// Classify a projected scenario
pub fn classify_result(result: &crate::models::ScenarioResult) -> Tier {
    classify(
        result.delta,
        result.percent_change,
        result.new_balance,
        result.monthly_income,
    )
}
