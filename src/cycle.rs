//! Pay-cycle detection.
//!
//! Everything downstream is period-relative, so the first job is finding
//! where the current pay cycle started. Salary keyword matches are the
//! primary signal; a large recent credit is the fallback; failing both, a
//! rolling assumed cycle keeps the report producible for sparse histories.

use crate::schema::{AnalysisConfig, Transaction};
use crate::utils::{days_ago, matches_any_keyword, matches_any_label};
use chrono::{Duration, NaiveDate};

/// Resolved period boundaries for one analysis run.
///
/// Invariant: `prev_period_end == period_start` (half-open previous period).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayCycle {
    pub period_start: NaiveDate,
    pub prev_period_start: NaiveDate,
    pub prev_period_end: NaiveDate,
    pub days_into_period: i64,
    pub avg_cycle_days: i64,
    pub days_until_next_salary: i64,
}

impl PayCycle {
    /// Point-in-time equivalent of "today" inside the previous cycle,
    /// clamped so it never spills past the previous period's end.
    pub fn compare_date_in_prev_period(&self) -> NaiveDate {
        let candidate = self.prev_period_start + Duration::days(self.days_into_period);
        candidate.min(self.prev_period_end)
    }
}

pub fn resolve_pay_cycle(
    history: &[Transaction],
    config: &AnalysisConfig,
    today: NaiveDate,
) -> PayCycle {
    let salary_dates = detect_salary_dates(history, config, today);

    let (period_start, prev_boundary, avg_cycle_days) = match salary_dates.as_slice() {
        [] => {
            let assumed = days_ago(today, config.assumed_days_since_salary);
            (assumed, None, config.default_cycle_days)
        }
        [only] => (*only, None, config.default_cycle_days),
        [latest, previous, ..] => {
            let avg = average_cycle_days(&salary_dates, config);
            (*latest, Some(*previous), avg)
        }
    };

    let prev_period_start =
        prev_boundary.unwrap_or_else(|| period_start - Duration::days(config.default_cycle_days));

    let days_into_period = (today - period_start).num_days().max(0);
    let next_salary = period_start + Duration::days(avg_cycle_days);
    let days_until_next_salary = (next_salary - today).num_days().max(1);

    PayCycle {
        period_start,
        prev_period_start,
        prev_period_end: period_start,
        days_into_period,
        avg_cycle_days,
        days_until_next_salary,
    }
}

/// Salary-like credit dates, newest first, deduplicated by date.
fn detect_salary_dates(
    history: &[Transaction],
    config: &AnalysisConfig,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = history
        .iter()
        .filter(|t| t.is_income() && matches_any_keyword(&t.description, &config.salary_keywords))
        .map(|t| t.date)
        .collect();

    if dates.is_empty() {
        // No keyword hit: accept at most one large recent credit (or an
        // income-labelled one) as the pay anchor.
        let lookback = days_ago(today, config.salary_fallback_lookback_days);
        let mut candidates: Vec<&Transaction> = history
            .iter()
            .filter(|t| {
                t.is_income()
                    && t.date >= lookback
                    && (t.amount >= config.salary_fallback_min_amount
                        || matches_any_label(t.category.as_deref(), &config.income_category_labels))
            })
            .collect();
        candidates.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(best) = candidates.first() {
            dates.push(best.date);
        }
    }

    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates.dedup();
    dates
}

/// Mean gap between consecutive salary dates, clamped to the configured
/// bounds. Requires at least two dates (newest first).
fn average_cycle_days(salary_dates: &[NaiveDate], config: &AnalysisConfig) -> i64 {
    let gaps: Vec<i64> = salary_dates
        .windows(2)
        .map(|w| (w[0] - w[1]).num_days())
        .collect();

    if gaps.is_empty() {
        return config.default_cycle_days;
    }

    let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
    (mean.round() as i64).clamp(config.min_cycle_days, config.max_cycle_days)
}
