//! Financial Assistant
//!
//! Keyword-routed answers to free-form questions about the user's finances.
//! Messages are matched against static keyword tables (English and Spanish)
//! in a fixed priority order; the first intent that matches answers.

use crate::models::Metrics;
use crate::report::{format_amount, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Spending,
    Income,
    Savings,
    Categories,
    Balance,
    Advice,
    Trend,
    Budget,
    Investment,
    Debt,
    General,
}

/// Static keyword lists, checked against the lowercased message
const HOW_MUCH_KEYWORDS: &[&str] = &["how much", "cuánto", "cuanto"];
const SPEND_KEYWORDS: &[&str] = &["spend", "spent", "expense", "gastado", "gasto"];

const INCOME_KEYWORDS: &[&str] = &["income", "earning", "salary", "ingreso"];

const SAVINGS_KEYWORDS: &[&str] = &["saving", "save", "ahorro", "ahorrar"];

const CATEGORY_KEYWORDS: &[&str] = &[
    "categor", "where do i spend", "what do i spend on",
    "donde gasto", "dónde gasto", "en qué gasto",
];

const BALANCE_KEYWORDS: &[&str] = &[
    "balance", "situation", "how am i doing",
    "situación", "cómo estoy",
];

const ADVICE_KEYWORDS: &[&str] = &[
    "advice", "recommend", "what should i do",
    "consejo", "recomendación", "qué hacer",
];

const TREND_KEYWORDS: &[&str] = &[
    "trend", "improving", "getting worse",
    "tendencia", "mejorando", "empeorando",
];

const BUDGET_KEYWORDS: &[&str] = &["budget", "presupuesto"];

const INVESTMENT_KEYWORDS: &[&str] = &["invest", "inversión", "invertir"];

const DEBT_KEYWORDS: &[&str] = &[
    "debt", "credit", "loan",
    "deuda", "crédito", "préstamo",
];

/// Trend labels that count as an upward trend
const POSITIVE_TREND_MARKERS: &[&str] = &["positive", "upward", "rising", "positiva", "ascendente"];

/// Intent classifier
pub struct IntentClassifier;

impl IntentClassifier {
    pub fn classify(message: &str) -> Intent {
        let text = message.to_lowercase();
        let has = |keywords: &[&str]| keywords.iter().any(|kw| text.contains(*kw));

        if has(HOW_MUCH_KEYWORDS) && has(SPEND_KEYWORDS) {
            Intent::Spending
        } else if has(INCOME_KEYWORDS) {
            Intent::Income
        } else if has(SAVINGS_KEYWORDS) {
            Intent::Savings
        } else if has(CATEGORY_KEYWORDS) {
            Intent::Categories
        } else if has(BALANCE_KEYWORDS) {
            Intent::Balance
        } else if has(ADVICE_KEYWORDS) {
            Intent::Advice
        } else if has(TREND_KEYWORDS) {
            Intent::Trend
        } else if has(BUDGET_KEYWORDS) {
            Intent::Budget
        } else if has(INVESTMENT_KEYWORDS) {
            Intent::Investment
        } else if has(DEBT_KEYWORDS) {
            Intent::Debt
        } else {
            Intent::General
        }
    }
}

/// Answer a message using the default currency
pub fn respond(message: &str, metrics: Option<&Metrics>) -> String {
    render(IntentClassifier::classify(message), metrics, DEFAULT_CURRENCY)
}

/// Render the answer for an already-classified intent
pub fn render(intent: Intent, metrics: Option<&Metrics>, currency: &str) -> String {
    let money = |v: f64| format_amount(v, currency);

    match (intent, metrics) {
        (Intent::Spending, Some(m)) => {
            let (top, amount) = m
                .top_category()
                .unwrap_or((crate::models::GENERAL_EXPENSES, 0.0));
            format!(
                "Your total expenses for the period are {}. Your largest category is {} with {}.\n\n\
                 I recommend reviewing this category for savings opportunities.",
                money(m.expenses),
                top,
                money(amount)
            )
        }
        (Intent::Income, Some(m)) => format!(
            "Your total income for the period is {}. With current expenses of {}, \
             your balance is {}.\n\nYour current savings rate is {:.1}%.",
            money(m.income),
            money(m.expenses),
            money(m.balance),
            m.savings_percent
        ),
        (Intent::Savings, Some(m)) => savings_answer(m),
        (Intent::Categories, Some(m)) => categories_answer(m, &money),
        (Intent::Balance, Some(m)) => {
            if m.balance > 0.0 {
                format!(
                    "Your financial situation is positive with a balance of {}.\n\n\
                     Analysis:\n\
                     • Trend: {}\n\
                     • Savings rate: {:.1}%\n\
                     • Income/expense ratio: {:.2}\n\n\
                     Keep your current habits and look for investment opportunities.",
                    money(m.balance),
                    m.trend,
                    m.savings_percent,
                    m.income / m.expenses.max(1.0)
                )
            } else {
                format!(
                    "Your current balance is negative: {}.\n\n\
                     Urgent measures:\n\
                     • Cut non-essential spending immediately\n\
                     • Prioritize paying the highest-interest debt\n\
                     • Avoid new credit card spending\n\
                     • Consider renegotiating pending payments",
                    money(m.balance.abs())
                )
            }
        }
        (Intent::Advice, Some(m)) => format!(
            "Based on your financial profile I recommend:\n\n\
             1. **Optimize spending**: reduce {} by 10-15%.\n\n\
             2. **Automatic savings**: schedule transfers of {}% of your income to a savings account.\n\n\
             3. **Emergency fund**: keep six months of expenses in reserve ({}).\n\n\
             4. **Monthly review**: check your metrics every month to stay in control.",
            m.top_category_name(),
            if m.savings_percent < 15.0 { 15 } else { 20 },
            money(m.expenses * 6.0)
        ),
        (Intent::Advice, None) => "To give you personalized recommendations I need your financial data.\n\n\
             General recommendations:\n\
             • Keep a detailed monthly budget\n\
             • Save at least 20% of your income\n\
             • Avoid high-interest consumer debt\n\
             • Review and adjust your spending regularly"
            .to_string(),
        (Intent::Trend, Some(m)) => {
            let trend = m.trend.to_lowercase();
            if POSITIVE_TREND_MARKERS.iter().any(|kw| trend.contains(*kw)) {
                format!(
                    "Your financial trend is positive and shows steady improvement.\n\n\
                     Favorable indicators:\n\
                     • Growing balance\n\
                     • Effective spending control\n\
                     • Savings rate: {:.1}%\n\n\
                     Keep these habits and raise your savings gradually.",
                    m.savings_percent
                )
            } else {
                "Your current trend needs attention. It is time to adjust your strategy.\n\n\
                 Corrective actions:\n\
                 • Identify unnecessary expenses to eliminate\n\
                 • Set spending limits per category\n\
                 • Look for ways to increase your income\n\
                 • Monitor your finances weekly"
                    .to_string()
            }
        }
        (Intent::Budget, Some(m)) => format!(
            "Recommended budget based on your income of {}:\n\n\
             • Needs: {} (50%)\n\
             • Wants: {} (30%)\n\
             • Savings and investment: {} (20%)\n\n\
             The 50/30/20 split is a standard reference; adjust it to your needs.",
            money(m.income),
            money(m.income * 0.5),
            money(m.income * 0.3),
            money(m.income * 0.2)
        ),
        (Intent::Budget, None) => "An effective budget follows the 50/30/20 rule:\n\n\
             • 50% for needs (housing, food, utilities)\n\
             • 30% for wants (entertainment, restaurants)\n\
             • 20% for savings and investment\n\n\
             Load your data to get a personalized budget."
            .to_string(),
        (Intent::Investment, Some(m)) => {
            if m.balance > m.expenses * 3.0 {
                format!(
                    "With your current balance of {} you are in a position to consider investing.\n\n\
                     Options by risk profile:\n\
                     **Conservative**: government bonds, debt funds\n\
                     **Moderate**: mixed funds, diversified ETFs\n\
                     **Aggressive**: individual stocks, emerging-market funds",
                    money(m.balance)
                )
            } else {
                format!(
                    "Before investing, build up your emergency fund.\n\n\
                     Recommended steps:\n\
                     1. Save six months of expenses ({})\n\
                     2. Pay off high-interest debt\n\
                     3. Then put 10-15% of your income into investments",
                    money(m.expenses * 6.0)
                )
            }
        }
        (Intent::Debt, _) => "Strategy for managing debt:\n\n\
             **Avalanche method** (most efficient):\n\
             1. Pay the minimum on every debt\n\
             2. Put any surplus toward the highest-interest debt\n\
             3. Once paid off, move to the next most expensive\n\n\
             **Snowball method** (motivational):\n\
             1. Pay off the smallest debt first\n\
             2. Roll the freed-up money into the next smallest\n\n\
             Avoid taking on new debt while paying down existing balances."
            .to_string(),
        (Intent::General, _) => "I can help you with:\n\n\
             • Spending and income analysis\n\
             • Savings recommendations\n\
             • Budget planning\n\
             • Investment readiness\n\
             • Debt strategies\n\n\
             Ask me something like \"how much did I spend?\" or \"how can I save more?\""
            .to_string(),
        (intent, None) => reload_message(intent).to_string(),
    }
}

fn savings_answer(m: &Metrics) -> String {
    let rate = m.savings_percent;
    if rate >= 20.0 {
        format!(
            "Excellent financial management. Your savings rate of {:.1}% is above the recommended level.\n\n\
             Recommendations:\n\
             • Put part of your savings into medium-term investments\n\
             • Keep an emergency fund of six months of expenses\n\
             • Look into scheduled savings plans with your bank",
            rate
        )
    } else if rate >= 10.0 {
        format!(
            "Your savings rate of {:.1}% is acceptable but can improve.\n\n\
             Suggestions:\n\
             • Set a savings goal of 20% of your income\n\
             • Reduce spending on {} by 10%\n\
             • Automate your savings with scheduled transfers",
            rate,
            m.top_category_name()
        )
    } else {
        format!(
            "Your savings rate of {:.1}% is below the recommended level.\n\n\
             Priority actions:\n\
             • Review fixed costs and look for cheaper alternatives\n\
             • Cut discretionary spending by 15-20%\n\
             • Set a strict monthly budget\n\
             • Consider additional sources of income",
            rate
        )
    }
}

fn categories_answer(m: &Metrics, money: &dyn Fn(f64) -> String) -> String {
    let ranked = m.ranked_categories();
    if ranked.is_empty() {
        return "No spending categories were reported for this period.".to_string();
    }

    let mut out = String::from("Your main spending categories are:\n\n");
    for (i, (name, amount)) in ranked.iter().take(3).enumerate() {
        out.push_str(&format!(
            "{}. {}: {} ({:.1}%)\n",
            i + 1,
            name,
            money(*amount),
            m.share_of_expenses(*amount)
        ));
    }
    out.push_str(&format!(
        "\nConsider optimizing spending on {} to improve your balance.",
        ranked[0].0
    ));
    out
}

fn reload_message(intent: Intent) -> &'static str {
    match intent {
        Intent::Spending => "To check your spending, please reload your financial data from the main screen.",
        Intent::Income => "To check your income, please refresh your data from the home screen.",
        Intent::Savings => "To analyze your savings capacity I need your financial metrics. Please reload your data.",
        Intent::Categories => "I need your financial data to analyze spending by category.",
        Intent::Balance => "To evaluate your financial situation, please load your latest data.",
        Intent::Trend => "To analyze trends I need historical data. Please refresh from the main screen.",
        Intent::Investment => "To evaluate investment options I need your current financial situation. Please reload your data.",
        _ => "Please reload your financial data.",
    }
}
