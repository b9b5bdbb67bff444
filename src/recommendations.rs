//! Rule-based recommendations over a user's metrics
//!
//! Always three entries, in order: savings rate, spending concentration,
//! emergency fund.

use crate::models::Metrics;

const LOW_SAVINGS_PERCENT: f64 = 10.0;
const TARGET_SAVINGS_PERCENT: f64 = 20.0;
const CONCENTRATION_PERCENT: f64 = 40.0;
const EMERGENCY_FUND_FLOOR_MONTHS: f64 = 3.0;
const EMERGENCY_FUND_TARGET_MONTHS: i64 = 6;

pub fn build_recommendations(metrics: &Metrics) -> Vec<String> {
    vec![
        savings_rate_advice(metrics),
        concentration_advice(metrics),
        emergency_fund_advice(metrics),
    ]
}

fn savings_rate_advice(metrics: &Metrics) -> String {
    if metrics.savings_percent < LOW_SAVINGS_PERCENT {
        format!(
            "Raise your savings to 15% by cutting discretionary spending in {}",
            metrics.top_category_name()
        )
    } else if metrics.savings_percent < TARGET_SAVINGS_PERCENT {
        "Reach the 20% savings goal to strengthen your financial stability".to_string()
    } else {
        format!(
            "Excellent savings rate of {:.1}%. Consider investment options",
            metrics.savings_percent
        )
    }
}

fn concentration_advice(metrics: &Metrics) -> String {
    let (name, amount) = metrics
        .top_category()
        .unwrap_or((crate::models::GENERAL_EXPENSES, 0.0));
    let share = metrics.share_of_expenses(amount);

    if share > CONCENTRATION_PERCENT {
        format!(
            "Optimize spending on {}, which makes up {:.0}% of your expenses",
            name, share
        )
    } else {
        "Keep your spending categories balanced; they are well distributed".to_string()
    }
}

/// Months of expenses still missing from a six-month fund
pub fn months_to_emergency_fund(metrics: &Metrics) -> i64 {
    let covered = if metrics.expenses > 0.0 {
        (metrics.balance / metrics.expenses).floor() as i64
    } else {
        0
    };
    EMERGENCY_FUND_TARGET_MONTHS.saturating_sub(covered)
}

fn emergency_fund_advice(metrics: &Metrics) -> String {
    if metrics.balance < metrics.expenses * EMERGENCY_FUND_FLOOR_MONTHS {
        format!(
            "Strengthen your emergency fund; you are {} months of expenses short of a secure cushion",
            months_to_emergency_fund(metrics)
        )
    } else {
        "Your emergency fund is solid. Explore investment options with your bank advisor".to_string()
    }
}
