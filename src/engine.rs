//! Health report assembly.
//!
//! Pure composition of the component outputs: no I/O, no shared state, safe
//! to run concurrently for different users or snapshots. Fixed and variable
//! burn are combined exactly once (in `true_daily_burn`) to avoid
//! double-counting fixed costs that also sit in the raw expense stream.

use crate::burn::{estimate_burn, BurnEstimate};
use crate::category::{analyze_categories, spend_by_category};
use crate::cycle::{resolve_pay_cycle, PayCycle};
use crate::normalize::normalize;
use crate::recurring::classify_recurring;
use crate::report::{FinancialHealthReport, TrendDirection};
use crate::schema::{AnalysisConfig, Transaction};
use crate::survival::{runway, survival_probability, value_at_risk};
use crate::upcoming::{expected_fixed_amounts, project_upcoming, upcoming_overhead};
use crate::utils::{days_ago, expenses_between, shift_back_one_year, sum_magnitudes};
use chrono::{Duration, NaiveDate};
use log::debug;
use std::collections::HashSet;

pub fn assemble_report(
    history: &[Transaction],
    current_balance: f64,
    config: &AnalysisConfig,
    today: NaiveDate,
) -> FinancialHealthReport {
    let cycle = resolve_pay_cycle(history, config, today);
    debug!(
        "Resolved pay cycle: period start {}, previous period {}..{}, {} days until next salary",
        cycle.period_start, cycle.prev_period_start, cycle.prev_period_end,
        cycle.days_until_next_salary
    );

    // Classification scope: the trailing analysis window, widened to cover
    // the whole previous period when it starts earlier.
    let scope_start = days_ago(today, config.analysis_window_days - 1).min(cycle.prev_period_start);
    let scope_expenses = expenses_between(history, scope_start, today);

    let fixed = classify_recurring(&scope_expenses, config);
    debug!("Classified {} fixed-cost merchant groups", fixed.len());

    let is_variable = |t: &&Transaction| !fixed.contains(&normalize(&t.description));

    // Burn over the trailing window, variable spend only.
    let window_start = days_ago(today, config.analysis_window_days - 1);
    let variable_window: Vec<&Transaction> = expenses_between(history, window_start, today)
        .into_iter()
        .filter(is_variable)
        .collect();
    let burn = estimate_burn(
        &variable_window,
        config.analysis_window_days,
        config.smoothing_factor,
        today,
    );
    debug!(
        "Burn estimate: mean {:.2}/day, std dev {:.2}",
        burn.daily_mean, burn.daily_std_dev
    );

    // Period partitions. The previous period is half-open, so its inclusive
    // filter end is the day before the boundary.
    let prior_end_inclusive = cycle.prev_period_end - Duration::days(1);
    let current = expenses_between(history, cycle.period_start, today);
    let prior_full = expenses_between(history, cycle.prev_period_start, prior_end_inclusive);
    let ptd_end = cycle.compare_date_in_prev_period().min(prior_end_inclusive);
    let prior_ptd = expenses_between(history, cycle.prev_period_start, ptd_end);

    let current_var: Vec<&Transaction> = current.iter().copied().filter(is_variable).collect();
    let prior_var_full: Vec<&Transaction> =
        prior_full.iter().copied().filter(is_variable).collect();
    let prior_var_ptd: Vec<&Transaction> =
        prior_ptd.iter().copied().filter(is_variable).collect();

    let top_categories = analyze_categories(&current_var, &prior_var_full, &prior_var_ptd, config);

    let upcoming_fixed_costs =
        project_upcoming(&prior_full, &current, &scope_expenses, &fixed, config);
    let overhead = upcoming_overhead(&upcoming_fixed_costs);

    // Fixed costs amortize into the daily burn once, from their projected
    // monthly totals rather than the raw expense stream.
    let fixed_monthly_total: f64 =
        expected_fixed_amounts(&scope_expenses, &fixed, config.recent_occurrence_window)
            .values()
            .sum();
    let true_daily_burn =
        burn.daily_mean + fixed_monthly_total / config.fixed_cost_amortization_days;

    let runway_estimate = runway(
        current_balance,
        overhead,
        true_daily_burn,
        burn.daily_std_dev,
    );

    let projected_balance_at_next_salary = current_balance
        - true_daily_burn * cycle.days_until_next_salary as f64
        - overhead;

    let period_spend = sum_magnitudes(&current);
    let prev_period_spend = hybrid_period_total(&prior_full, &prior_ptd, config);
    let same_period_last_year_spend = same_period_last_year(history, &cycle);
    let projected_cycle_end_spend =
        period_spend + true_daily_burn * cycle.days_until_next_salary as f64;

    FinancialHealthReport {
        generated_on: today,
        current_balance,
        daily_burn_rate: burn.daily_mean,
        burn_volatility: burn.daily_std_dev,
        true_daily_burn,
        safe_runway_days: runway_estimate.safe_days,
        expected_runway_days: runway_estimate.expected_days,
        optimistic_runway_days: runway_estimate.optimistic_days,
        value_at_risk: value_at_risk(burn.daily_std_dev, cycle.days_until_next_salary),
        trend: trend_direction(&burn, config.trend_sensitivity),
        period_spend,
        prev_period_spend,
        same_period_last_year_spend,
        projected_cycle_end_spend,
        projected_balance_at_next_salary,
        survival_probability: survival_probability(
            projected_balance_at_next_salary,
            burn.daily_std_dev,
            cycle.days_until_next_salary,
            config.degrees_of_freedom,
        ),
        days_until_next_salary: cycle.days_until_next_salary,
        days_into_period: cycle.days_into_period,
        avg_cycle_days: cycle.avg_cycle_days,
        top_categories,
        upcoming_fixed_costs,
    }
}

/// Previous-period comparison total under the same hybrid rule the category
/// analyzer applies: period-to-date unless implausibly small, else the full
/// prior period.
fn hybrid_period_total(
    prior_full: &[&Transaction],
    prior_ptd: &[&Transaction],
    config: &AnalysisConfig,
) -> f64 {
    let full = sum_magnitudes(prior_full);
    let ptd = sum_magnitudes(prior_ptd);
    if full > 0.0 && ptd < full * config.hybrid_baseline_ratio {
        full
    } else {
        ptd
    }
}

/// Spend over the equivalent elapsed window one year earlier, for
/// seasonality context.
fn same_period_last_year(history: &[Transaction], cycle: &PayCycle) -> f64 {
    let start = shift_back_one_year(cycle.period_start);
    let end = start + Duration::days(cycle.days_into_period);
    sum_magnitudes(&expenses_between(history, start, end))
}

/// EWMA mean versus the simple window average, inside a sensitivity band.
fn trend_direction(burn: &BurnEstimate, sensitivity: f64) -> TrendDirection {
    if burn.simple_daily_mean <= 0.0 {
        return TrendDirection::Stable;
    }
    if burn.daily_mean > burn.simple_daily_mean * (1.0 + sensitivity) {
        TrendDirection::Increasing
    } else if burn.daily_mean < burn.simple_daily_mean * (1.0 - sensitivity) {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

/// Exposed for diagnostics: the fixed-cost merchant groups a history would
/// be classified with, under the same scope the assembler uses.
pub fn fixed_cost_groups(
    history: &[Transaction],
    config: &AnalysisConfig,
    today: NaiveDate,
) -> HashSet<String> {
    let cycle = resolve_pay_cycle(history, config, today);
    let scope_start = days_ago(today, config.analysis_window_days - 1).min(cycle.prev_period_start);
    let scope = expenses_between(history, scope_start, today);
    classify_recurring(&scope, config)
}

/// Category spend totals for the current period, for chart consumers that
/// want more than the top-N report slice.
pub fn current_period_category_totals(
    history: &[Transaction],
    config: &AnalysisConfig,
    today: NaiveDate,
) -> Vec<(String, f64)> {
    let cycle = resolve_pay_cycle(history, config, today);
    let current = expenses_between(history, cycle.period_start, today);
    let mut totals: Vec<(String, f64)> = spend_by_category(&current).into_iter().collect();
    totals.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    totals
}
