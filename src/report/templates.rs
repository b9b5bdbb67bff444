//! Built-in evaluation templates
//!
//! One template per tier and horizon band. Neutral does not vary with the
//! horizon and is registered for every band.

use super::{HorizonBand, Phase, ReportContext, TemplateRegistry};
use crate::classifier::Tier;

pub(super) fn register_defaults(registry: &mut TemplateRegistry) {
    registry.register(Tier::VeryPositive, HorizonBand::Short, very_positive_short);
    registry.register(Tier::VeryPositive, HorizonBand::Medium, very_positive_medium);
    registry.register(Tier::VeryPositive, HorizonBand::Long, very_positive_long);

    registry.register(Tier::Positive, HorizonBand::Short, positive_short);
    registry.register(Tier::Positive, HorizonBand::Medium, positive_medium);
    registry.register(Tier::Positive, HorizonBand::Long, positive_long);

    registry.register(Tier::SlightlyPositive, HorizonBand::Short, slightly_positive_short);
    registry.register(Tier::SlightlyPositive, HorizonBand::Medium, slightly_positive_medium);
    registry.register(Tier::SlightlyPositive, HorizonBand::Long, slightly_positive_long);

    for band in HorizonBand::ALL {
        registry.register(Tier::Neutral, band, neutral);
    }

    registry.register(Tier::SlightlyNegative, HorizonBand::Short, slightly_negative_short);
    registry.register(Tier::SlightlyNegative, HorizonBand::Medium, slightly_negative_medium);
    registry.register(Tier::SlightlyNegative, HorizonBand::Long, slightly_negative_long);

    registry.register(Tier::Negative, HorizonBand::Short, negative_short);
    registry.register(Tier::Negative, HorizonBand::Medium, negative_medium);
    registry.register(Tier::Negative, HorizonBand::Long, negative_long);

    registry.register(Tier::Critical, HorizonBand::Short, critical_short);
    registry.register(Tier::Critical, HorizonBand::Medium, critical_medium);
    registry.register(Tier::Critical, HorizonBand::Long, critical_long);
}

//
// ===== Building blocks =====
//

/// Per-phase figure printed under each step of an action plan
#[derive(Clone, Copy)]
enum Target {
    /// Running total of the new monthly balance
    Savings,
    /// Monthly improvement ramping from 70% to the full delta
    Ramp,
    /// Running total of balance given up
    Lost,
    /// Running total of debt taken on
    Deficit,
}

struct PhaseCopy {
    opening: &'static [&'static str],
    middle: &'static [&'static str],
    closing: &'static [&'static str],
}

fn headline(ctx: &ReportContext<'_>, title: &str) -> String {
    format!("**{}-MONTH PROJECTION: {}**\n\n", ctx.months(), title)
}

fn evaluation(label: &str) -> String {
    format!("**EVALUATION: {}**\n\n", label)
}

fn section(title: &str, items: &[String]) -> String {
    let mut out = format!("**{}:**\n", title);
    for item in items {
        out.push_str("• ");
        out.push_str(item);
        out.push('\n');
    }
    out.push('\n');
    out
}

fn action_plan(ctx: &ReportContext<'_>, title: &str, copy: &PhaseCopy, target: Target) -> String {
    let mut out = format!("**{}:**\n\n", title);
    let last = ctx.phases.len().saturating_sub(1);

    for (i, phase) in ctx.phases.iter().enumerate() {
        let steps = if i == 0 {
            copy.opening
        } else if i == last {
            copy.closing
        } else {
            copy.middle
        };

        out.push_str(&format!("**{}:**\n", phase.label));
        for step in steps {
            out.push_str(&format!("• {}\n", step));
        }
        out.push_str(&format!("• {}\n\n", target_line(ctx, phase, i, last, target)));
    }
    out
}

fn target_line(ctx: &ReportContext<'_>, phase: &Phase, i: usize, last: usize, target: Target) -> String {
    let s = ctx.scenario;
    match target {
        Target::Savings => format!(
            "Cumulative target by month {}: {}",
            phase.end,
            ctx.over(s.new_balance, phase.end)
        ),
        Target::Ramp => {
            let factor = if last == 0 {
                1.0
            } else {
                0.7 + 0.3 * (i as f64) / (last as f64)
            };
            format!(
                "Expected monthly improvement: {} ({:.0}% of the adjustments)",
                ctx.money(s.delta * factor),
                factor * 100.0
            )
        }
        Target::Lost => format!(
            "Balance given up by month {}: {}",
            phase.end,
            ctx.over(ctx.monthly_impact(), phase.end)
        ),
        Target::Deficit => format!(
            "Accumulated debt by month {}: {}",
            phase.end,
            ctx.over(s.new_balance.abs(), phase.end)
        ),
    }
}

fn years(ctx: &ReportContext<'_>) -> f64 {
    f64::from(ctx.months()) / 12.0
}

//
// ===== Very positive =====
//

fn very_positive_short(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("EXCELLENT"));
    out.push_str(&format!(
        "Your adjustments improve your balance by {} per month. Over {} you would set aside {}.\n\n",
        ctx.money(s.delta),
        ctx.horizon,
        ctx.money(ctx.projected_total())
    ));
    out.push_str(&section(
        "WHY THIS WORKS",
        &[
            format!("A savings rate of {} puts you on track", ctx.percent(s.new_savings_rate())),
            "Builds a short-term emergency fund quickly".to_string(),
            "Keeps liquidity free for opportunities".to_string(),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "MONTH-BY-MONTH PLAN",
        &PhaseCopy {
            opening: &[
                "Update your budgets to the proposed limits",
                "Set alerts so you do not go over the new limits",
            ],
            middle: &[
                "Review compliance every week",
                "Move half of the extra savings into an emergency fund",
            ],
            closing: &[
                "Compare actual results with this projection",
                "Consider saving an additional 5%",
            ],
        },
        Target::Savings,
    ));
    out.push_str(&section(
        "BY THE END OF THE PERIOD YOU COULD",
        &[
            format!("Hold a contingency fund of {}", ctx.money(ctx.projected_total())),
            "Start investing in low-risk instruments".to_string(),
            "Plan a bigger financial goal".to_string(),
        ],
    ));
    out
}

fn very_positive_medium(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("EXCELLENT"));
    out.push_str(&format!(
        "This strategy reshapes your finances. A monthly improvement of {} adds up to {} over {}.\n\n",
        ctx.money(s.delta),
        ctx.money(ctx.projected_total()),
        ctx.horizon
    ));
    out.push_str(&section(
        "WHY THIS WORKS",
        &[
            format!(
                "Savings rate rises from {} to {}",
                ctx.percent(s.current_savings_rate()),
                ctx.percent(s.new_savings_rate())
            ),
            "The adjustments are large enough to build real reserves".to_string(),
            "Enough time to turn the new limits into habits".to_string(),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "ACTION PLAN",
        &PhaseCopy {
            opening: &[
                "Apply the new limits in every adjusted category",
                "Goal: meet at least 80% of the proposed adjustments",
            ],
            middle: &[
                "Consolidate the habits from the first phase",
                "Open a separate account for the savings",
            ],
            closing: &[
                "Evaluate results and tune the limits",
                "Decide where the accumulated savings should go",
            ],
        },
        Target::Savings,
    ));
    out.push_str(&section(
        "OPPORTUNITIES",
        &[
            "Emergency fund covering several months of expenses".to_string(),
            "Low-risk investment of the surplus".to_string(),
            "Early payment of any outstanding debt".to_string(),
        ],
    ));
    out.push_str(&format!(
        "**LONG-TERM IMPACT:** keeping this up for a year would put {} aside.\n",
        ctx.over(s.new_balance, 12)
    ));
    out
}

fn very_positive_long(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let total = ctx.projected_total();
    let mut out = headline(ctx, &ctx.money(total));
    out.push_str(&evaluation("OUTSTANDING"));
    out.push_str(&format!(
        "Sustained over {}, these adjustments build {} in savings.\n\n",
        ctx.horizon,
        ctx.money(total)
    ));
    out.push_str(&section(
        "WHY THIS WORKS",
        &[
            format!("New savings rate of {}", ctx.percent(s.new_savings_rate())),
            format!("{} more every month", ctx.money(s.delta)),
            "Long enough for compounding to matter".to_string(),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "ROADMAP",
        &PhaseCopy {
            opening: &[
                "Put the new limits in place and automate the transfers",
                "Objective: an emergency fund of three months of expenses",
            ],
            middle: &[
                "Keep discipline in every adjusted category",
                "Start a low-risk investment with part of the savings",
            ],
            closing: &[
                "Review the whole period against this projection",
                "Set the goals for the next cycle",
            ],
        },
        Target::Savings,
    ));
    out.push_str(&section(
        "SUGGESTED USE OF THE SAVINGS",
        &[
            format!("70% to a diversified portfolio: {}", ctx.money(total * 0.7)),
            format!("30% kept as liquid reserve: {}", ctx.money(total * 0.3)),
        ],
    ));
    out.push_str(&section(
        "BEYOND THIS HORIZON",
        &[
            format!("Two years at this pace: {}", ctx.over(s.new_balance, 24)),
            format!(
                "Two years invested at 6% a year: {}",
                ctx.money(s.new_balance * 24.0 * 1.06)
            ),
            format!(
                "Five years invested: roughly {}",
                ctx.money(s.new_balance * 12.0 * 5.5)
            ),
        ],
    ));
    out
}

//
// ===== Positive =====
//

fn positive_short(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("VERY GOOD"));
    out.push_str(&format!(
        "A solid improvement of {} per month ({} vs today).\n\n",
        ctx.money(s.delta),
        ctx.percent(s.percent_change)
    ));
    out.push_str(&action_plan(
        ctx,
        "MONTH-BY-MONTH PLAN",
        &PhaseCopy {
            opening: &["Apply the adjustments gradually", "Track every expense in the adjusted categories"],
            middle: &["Tighten toward the full adjustment", "Correct any category that drifts"],
            closing: &["Hold the full adjustment", "Decide what to do with the savings"],
        },
        Target::Ramp,
    ));
    out.push_str(&section(
        "RECOMMENDATIONS",
        &[
            "Automate a transfer to savings on payday".to_string(),
            "Review the adjusted categories every two weeks".to_string(),
        ],
    ));
    out
}

fn positive_medium(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("VERY GOOD"));
    out.push_str(&format!(
        "Your savings rate moves from {} to {}. Over {} that is {}.\n\n",
        ctx.percent(s.current_savings_rate()),
        ctx.percent(s.new_savings_rate()),
        ctx.horizon,
        ctx.money(ctx.projected_total())
    ));
    out.push_str(&action_plan(
        ctx,
        "ACTION PLAN",
        &PhaseCopy {
            opening: &["Adapt to the new limits", "Note which categories are hardest to hold"],
            middle: &["Optimize the categories that resist", "Keep the savings in a separate account"],
            closing: &["Consolidate the new budget", "Consider a slightly more ambitious target"],
        },
        Target::Savings,
    ));
    out.push_str(&section(
        "TO GO FURTHER",
        &[
            "Look for one more category to trim by 5-10%".to_string(),
            format!("A year at this pace: {}", ctx.over(s.new_balance, 12)),
        ],
    ));
    out
}

fn positive_long(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("VERY GOOD"));
    out.push_str(&format!(
        "A steady {} more per month becomes {} extra over {}.\n\n",
        ctx.money(s.delta),
        ctx.over(s.delta, ctx.months()),
        ctx.horizon
    ));
    out.push_str(&action_plan(
        ctx,
        "ROADMAP",
        &PhaseCopy {
            opening: &["Establish the new budget", "Build a first reserve"],
            middle: &["Hold the adjustments", "Review progress at the end of each stage"],
            closing: &["Measure against this projection", "Plan the next savings goal"],
        },
        Target::Savings,
    ));
    out.push_str(&section(
        "LONG-TERM VIEW",
        &[
            format!("Two years at this pace: {}", ctx.over(s.new_balance, 24)),
            "Pair the savings with a low-risk investment".to_string(),
        ],
    ));
    out
}

//
// ===== Slightly positive =====
//

fn slightly_positive_short(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("ACCEPTABLE"));
    out.push_str(&format!(
        "The improvement is real but modest: {} per month ({}).\n\n",
        ctx.money(s.delta),
        ctx.percent(s.percent_change)
    ));
    out.push_str(&section(
        "WHY ONLY ACCEPTABLE",
        &[
            "The change is small relative to your balance".to_string(),
            "Little room to absorb an unexpected expense".to_string(),
        ],
    ));
    out.push_str(&section(
        "IMPROVED PLAN",
        &[
            format!("Push the adjustments further and save {} per month", ctx.money(s.delta * 3.0)),
            format!("Projection with the improved plan: {}", ctx.money(ctx.projected_total() + s.delta * 2.0 * f64::from(ctx.months()))),
        ],
    ));
    out
}

fn slightly_positive_medium(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("ACCEPTABLE BUT IMPROVABLE"));
    out.push_str(&format!(
        "You gain {} over {}. A bolder plan would make a visible difference.\n\n",
        ctx.over(s.delta, ctx.months()),
        ctx.horizon
    ));
    out.push_str(&section(
        "OPTIONS",
        &[
            format!(
                "Option A, deepen current adjustments: about {} more per month",
                ctx.money(s.delta * 1.5)
            ),
            "Option B, add one more category to the plan".to_string(),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "ACTION PLAN",
        &PhaseCopy {
            opening: &["Apply the proposed adjustments"],
            middle: &["Identify a second category to trim"],
            closing: &["Compare both plans and keep the better one"],
        },
        Target::Savings,
    ));
    out
}

fn slightly_positive_long(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("SOLID START WITH ROOM TO IMPROVE"));
    out.push_str(&section(
        "COMPARISON",
        &[
            format!("Current plan over {}: {}", ctx.horizon, ctx.money(ctx.projected_total())),
            format!(
                "Optimized plan (3x the adjustment): {}",
                ctx.over(s.new_balance + s.delta * 2.0, ctx.months())
            ),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "ROADMAP",
        &PhaseCopy {
            opening: &["Start with the proposed adjustments"],
            middle: &["Add a new adjustment each stage"],
            closing: &["Review the cumulative effect"],
        },
        Target::Savings,
    ));
    out
}

//
// ===== Neutral =====
//

fn neutral(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("NO CHANGE"));

    if s.has_adjustments() {
        out.push_str("Your adjustments offset each other; the balance stays the same.\n\n");
        out.push_str(&section(
            "WHAT TO CONSIDER",
            &[
                "Increases in some categories cancel the savings in others".to_string(),
                "Decide which of the increases are really necessary".to_string(),
            ],
        ));
    } else {
        out.push_str("No adjustments were applied, so the projection simply continues today's balance.\n\n");
        out.push_str(&section(
            "NEXT STEPS",
            &[
                "Try reducing your largest category by 10%".to_string(),
                "Compare the result with this baseline".to_string(),
            ],
        ));
    }

    out.push_str(&format!(
        "Over {} your balance stays at {} per month.\n",
        ctx.horizon,
        ctx.money(s.new_balance)
    ));
    out
}

//
// ===== Slightly negative =====
//

fn slightly_negative_short(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("SLIGHTLY NEGATIVE"));
    out.push_str(&format!(
        "You would have {} less per month, {} over {}.\n\n",
        ctx.money(ctx.monthly_impact()),
        ctx.over(ctx.monthly_impact(), ctx.months()),
        ctx.horizon
    ));
    out.push_str(&section(
        "HOW TO CORRECT IT",
        &[
            "Check whether the increases are essential".to_string(),
            "Offset them with a small cut in another category".to_string(),
        ],
    ));
    out
}

fn slightly_negative_medium(ctx: &ReportContext<'_>) -> String {
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("NEEDS ATTENTION"));
    out.push_str(&format!(
        "Small monthly losses add up: {} less over {}.\n\n",
        ctx.over(ctx.monthly_impact(), ctx.months()),
        ctx.horizon
    ));
    out.push_str(&action_plan(
        ctx,
        "CORRECTION PLAN",
        &PhaseCopy {
            opening: &["Identify which increase hurts the most"],
            middle: &["Trim a flexible category to compensate"],
            closing: &["Confirm the balance is back to its starting level"],
        },
        Target::Lost,
    ));
    out
}

fn slightly_negative_long(ctx: &ReportContext<'_>) -> String {
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("PROBLEMATIC IN THE LONG RUN"));
    out.push_str(&section(
        "COST OVER TIME",
        &[
            format!("First year: {} less", ctx.over(ctx.monthly_impact(), 12)),
            format!("Second year: {} less in total", ctx.over(ctx.monthly_impact(), 24)),
            format!(
                "Opportunity cost at 6% a year: {}",
                ctx.money(ctx.monthly_impact() * 24.0 * 1.06)
            ),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "CORRECTION ROADMAP",
        &PhaseCopy {
            opening: &["Reverse the least necessary increase"],
            middle: &["Find offsets in flexible spending"],
            closing: &["Return to at least the original balance"],
        },
        Target::Lost,
    ));
    out
}

//
// ===== Negative =====
//

fn negative_short(ctx: &ReportContext<'_>) -> String {
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("NOT RECOMMENDED"));
    out.push_str(&format!(
        "This plan costs you {} per month and {} over {}.\n\n",
        ctx.money(ctx.monthly_impact()),
        ctx.over(ctx.monthly_impact(), ctx.months()),
        ctx.horizon
    ));
    out.push_str(&section(
        "CRITICAL QUESTIONS",
        &[
            "Is each increase a need or a want?".to_string(),
            "Can the purchase wait until your balance recovers?".to_string(),
        ],
    ));
    out
}

fn negative_medium(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("RISKY"));
    out.push_str(&format!(
        "Your savings rate drops from {} to {}.\n\n",
        ctx.percent(s.current_savings_rate()),
        ctx.percent(s.new_savings_rate())
    ));
    out.push_str(&action_plan(
        ctx,
        "DAMAGE CONTROL",
        &PhaseCopy {
            opening: &["Undo the largest increase"],
            middle: &["Cut discretionary spending to compensate"],
            closing: &["Rebuild the lost savings"],
        },
        Target::Lost,
    ));
    out
}

fn negative_long(ctx: &ReportContext<'_>) -> String {
    let mut out = headline(ctx, &ctx.money(ctx.projected_total()));
    out.push_str(&evaluation("HIGHLY RISKY"));
    out.push_str(&section(
        "LONG-TERM SCENARIO",
        &[
            format!("Over {}: {} less", ctx.horizon, ctx.over(ctx.monthly_impact(), ctx.months())),
            format!("Over three years: {} less", ctx.over(ctx.monthly_impact(), 36)),
            "Less room for emergencies and goals".to_string(),
        ],
    ));
    out.push_str(&action_plan(
        ctx,
        "RECOVERY ROADMAP",
        &PhaseCopy {
            opening: &["Reverse the increases that are not essential"],
            middle: &["Hold a strict budget in flexible categories"],
            closing: &["Reassess whether the plan is still needed"],
        },
        Target::Lost,
    ));
    out
}

//
// ===== Critical =====
//

fn critical_intro(ctx: &ReportContext<'_>, label: &str) -> String {
    let s = ctx.scenario;
    let mut out = headline(
        ctx,
        &format!("CRITICAL SITUATION ({})", ctx.money(ctx.projected_total())),
    );
    out.push_str(&evaluation(label));
    if s.new_balance < 0.0 {
        out.push_str(&format!(
            "You would spend {} more than you earn every month, {} of debt over {}.\n\n",
            ctx.money(s.new_balance.abs()),
            ctx.over(s.new_balance.abs(), ctx.months()),
            ctx.horizon
        ));
    } else {
        out.push_str(&format!(
            "Your balance falls by {} per month ({}), leaving almost no margin.\n\n",
            ctx.money(ctx.monthly_impact()),
            ctx.percent(s.percent_change)
        ));
    }
    out
}

fn critical_short(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = critical_intro(ctx, "UNSUSTAINABLE");
    if s.new_balance < 0.0 {
        out.push_str(&section(
            "CONSEQUENCES",
            &[format!(
                "Interest at 3% a month on the shortfall: about {}",
                ctx.money(s.new_balance.abs() * f64::from(ctx.months()) * 0.03)
            )],
        ));
    }
    out.push_str(&section(
        "IMMEDIATE ACTIONS",
        &[
            "Do not apply this plan".to_string(),
            "Cut every non-essential expense this month".to_string(),
        ],
    ));
    out
}

fn critical_medium(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = critical_intro(ctx, "CATASTROPHIC");
    let target = if s.new_balance < 0.0 {
        out.push_str(&section(
            "CONSEQUENCES",
            &[format!(
                "Interest at 18% a year: about {}",
                ctx.money(s.new_balance.abs() * f64::from(ctx.months()) * 0.18 * years(ctx))
            )],
        ));
        Target::Deficit
    } else {
        Target::Lost
    };
    out.push_str(&action_plan(
        ctx,
        "EMERGENCY PLAN",
        &PhaseCopy {
            opening: &["Reverse the adjustments now", "Freeze non-essential spending"],
            middle: &["Renegotiate fixed costs"],
            closing: &["Rebuild a minimum cushion"],
        },
        target,
    ));
    out
}

fn critical_long(ctx: &ReportContext<'_>) -> String {
    let s = ctx.scenario;
    let mut out = critical_intro(ctx, "CATASTROPHIC AND UNSUSTAINABLE");
    let target = if s.new_balance < 0.0 {
        out.push_str(&section(
            "CONSEQUENCES",
            &[
                format!(
                    "Interest at 25% a year: about {}",
                    ctx.money(s.new_balance.abs() * f64::from(ctx.months()) * 0.25 * years(ctx))
                ),
                "Serious risk to your credit history".to_string(),
            ],
        ));
        Target::Deficit
    } else {
        Target::Lost
    };
    out.push_str(&action_plan(
        ctx,
        "RESCUE PLAN",
        &PhaseCopy {
            opening: &["Abandon this plan", "Talk to a financial advisor"],
            middle: &["Restructure fixed commitments"],
            closing: &["Return to a positive monthly balance"],
        },
        target,
    ));
    out
}
