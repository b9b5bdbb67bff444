//! Advisory report generation
//!
//! A report is a fixed header (current situation, proposed adjustments,
//! projected results) followed by a tier-specific evaluation. The evaluation
//! is looked up in a registry keyed by `(Tier, HorizonBand)`, so the
//! classifier and the narrative stay independent.

mod templates;

use crate::classifier::Tier;
use crate::models::ScenarioResult;
use crate::scenario::{Horizon, DEFAULT_MAX_HORIZON_MONTHS};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_CURRENCY: &str = "MXN";

/// Template bucket for a projection horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizonBand {
    /// Up to a quarter: planned month by month
    Short,
    /// Up to half a year: planned in three phases
    Medium,
    /// Longer: planned in four stages
    Long,
}

impl HorizonBand {
    pub const ALL: [HorizonBand; 3] = [HorizonBand::Short, HorizonBand::Medium, HorizonBand::Long];

    pub fn from_months(months: u32) -> Self {
        match months {
            0..=3 => HorizonBand::Short,
            4..=6 => HorizonBand::Medium,
            _ => HorizonBand::Long,
        }
    }

    fn phase_count(&self, months: u32) -> u32 {
        match self {
            HorizonBand::Short => months,
            HorizonBand::Medium => 3,
            HorizonBand::Long => 4,
        }
    }
}

/// A contiguous run of months in an action plan (1-based, inclusive)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phase {
    pub index: u32,
    pub start: u32,
    pub end: u32,
    pub label: String,
}

/// Split a horizon into the phases its band plans with
pub fn plan_phases(horizon: Horizon) -> Vec<Phase> {
    let months = horizon.months();
    let band = HorizonBand::from_months(months);
    let count = band.phase_count(months).clamp(1, months);

    let mut phases = Vec::with_capacity(count as usize);
    let mut start = 1;
    for index in 1..=count {
        // Widened so month * index cannot overflow; the result never exceeds months
        let end = (u64::from(months) * u64::from(index)).div_ceil(u64::from(count)) as u32;
        let label = phase_label(band, months, index, start, end);
        phases.push(Phase { index, start, end, label });
        start = end.saturating_add(1);
    }
    phases
}

fn phase_label(band: HorizonBand, months: u32, index: u32, start: u32, end: u32) -> String {
    let span = if start == end {
        format!("Month {}", start)
    } else {
        format!("Months {}-{}", start, end)
    };

    match band {
        HorizonBand::Short => span,
        HorizonBand::Medium => format!("Phase {}: {}", index, span),
        HorizonBand::Long if months == 12 => format!("Q{} ({})", index, span),
        HorizonBand::Long => format!("Stage {} ({})", index, span),
    }
}

/// Format an amount with thousands separators and two decimals
pub fn format_money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, cents) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // Avoid "-0.00" for values that round to zero
    if value < 0.0 && formatted.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        format!("-{}.{}", grouped, cents)
    } else {
        format!("{}.{}", grouped, cents)
    }
}

/// Format an amount with a dollar sign and currency code, e.g. `-$1,000.00 MXN`
pub fn format_amount(value: f64, currency: &str) -> String {
    let formatted = format_money(value);
    match formatted.strip_prefix('-') {
        Some(abs) => format!("-${} {}", abs, currency),
        None => format!("${} {}", formatted, currency),
    }
}

/// Everything a template needs to render
pub struct ReportContext<'a> {
    pub tier: Tier,
    pub horizon: Horizon,
    pub band: HorizonBand,
    pub scenario: &'a ScenarioResult,
    pub phases: Vec<Phase>,
    currency: &'a str,
}

impl<'a> ReportContext<'a> {
    pub fn months(&self) -> u32 {
        self.horizon.months()
    }

    /// Monthly balance carried across the report's horizon
    pub fn projected_total(&self) -> f64 {
        self.scenario.new_balance * f64::from(self.months())
    }

    /// Monthly balance gained or lost, as a positive amount
    pub fn monthly_impact(&self) -> f64 {
        self.scenario.delta.abs()
    }

    /// `amount` per month over `months`, as a currency string
    pub fn over(&self, amount: f64, months: u32) -> String {
        self.money(amount * f64::from(months))
    }

    pub fn money(&self, value: f64) -> String {
        format_amount(value, self.currency)
    }

    pub fn percent(&self, value: f64) -> String {
        format!("{:.1}%", value)
    }
}

/// Renders the tier-specific part of a report
pub type TemplateFn = fn(&ReportContext<'_>) -> String;

/// Registry of evaluation templates keyed by tier and horizon band
pub struct TemplateRegistry {
    templates: HashMap<(Tier, HorizonBand), TemplateFn>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn register(&mut self, tier: Tier, band: HorizonBand, template: TemplateFn) {
        self.templates.insert((tier, band), template);
    }

    pub fn get(&self, tier: Tier, band: HorizonBand) -> Option<TemplateFn> {
        self.templates.get(&(tier, band)).copied()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for TemplateRegistry {
    /// Registry with the built-in template for every tier and band
    fn default() -> Self {
        let mut registry = Self::new();
        templates::register_defaults(&mut registry);
        registry
    }
}

/// Renders full advisory reports
pub struct ReportGenerator {
    registry: TemplateRegistry,
    currency: String,
    max_horizon_months: u32,
}

impl ReportGenerator {
    pub fn new(registry: TemplateRegistry, currency: impl Into<String>, max_horizon_months: u32) -> Self {
        Self {
            registry,
            currency: currency.into(),
            max_horizon_months,
        }
    }

    pub fn max_horizon_months(&self) -> u32 {
        self.max_horizon_months
    }

    /// Render the report for a classified scenario over `horizon`
    pub fn generate(&self, tier: Tier, horizon: Horizon, scenario: &ScenarioResult) -> Result<String> {
        // Re-validate against this generator's limit
        let horizon = Horizon::with_max(horizon.months(), self.max_horizon_months)?;
        let band = HorizonBand::from_months(horizon.months());

        let template = self.registry.get(tier, band).ok_or_else(|| {
            crate::error::AdvisorError::UnsupportedHorizon {
                months: horizon.months(),
                max: self.max_horizon_months,
            }
        })?;

        let ctx = ReportContext {
            tier,
            horizon,
            band,
            scenario,
            phases: plan_phases(horizon),
            currency: &self.currency,
        };

        debug!(tier = %tier, months = horizon.months(), ?band, "Rendering report");

        let mut report = render_header(&ctx);
        report.push_str(&template(&ctx));
        Ok(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(
            TemplateRegistry::default(),
            DEFAULT_CURRENCY,
            DEFAULT_MAX_HORIZON_MONTHS,
        )
    }
}

/// Render a report with the built-in templates and default currency
pub fn generate_report(tier: Tier, horizon: Horizon, scenario: &ScenarioResult) -> Result<String> {
    ReportGenerator::default().generate(tier, horizon, scenario)
}

fn render_header(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = format!(
        "**FINANCIAL ANALYSIS - {} PROJECTION**\n\n",
        ctx.horizon.to_string().to_uppercase()
    );

    out.push_str("**CURRENT SITUATION:**\n");
    out.push_str(&format!("• Monthly income: {}\n", ctx.money(s.monthly_income)));
    out.push_str(&format!("• Current expenses: {}\n", ctx.money(s.current_expenses)));
    out.push_str(&format!("• Monthly balance: {}\n", ctx.money(s.current_balance)));
    out.push_str(&format!("• Savings rate: {}\n\n", ctx.percent(s.current_savings_rate())));

    out.push_str("**PROPOSED ADJUSTMENTS:**\n");
    if s.adjustments.is_empty() {
        out.push_str("• No category adjustments\n");
    }
    for adj in &s.adjustments {
        let sign = if adj.percent >= 0.0 { "+" } else { "" };
        let money = ctx.money(adj.change);
        out.push_str(&format!(
            "• {}: {}{:.0}% ({}{})\n",
            adj.category,
            sign,
            adj.percent,
            if adj.change >= 0.0 { "+" } else { "" },
            money
        ));
    }

    out.push_str("\n**PROJECTED RESULTS:**\n");
    out.push_str(&format!("• New monthly expenses: {}\n", ctx.money(s.new_expenses)));
    out.push_str(&format!("• New monthly balance: {}\n", ctx.money(s.new_balance)));
    out.push_str(&format!("• New savings rate: {}\n", ctx.percent(s.new_savings_rate())));
    out.push_str(&format!(
        "• Monthly impact: {} ({})\n",
        ctx.money(ctx.monthly_impact()),
        if s.delta >= 0.0 { "improvement" } else { "reduction" }
    ));
    out.push_str(&format!("• Change vs current: {}\n\n", ctx.percent(s.percent_change)));

    out
}
