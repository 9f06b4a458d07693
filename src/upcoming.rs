//! Upcoming-obligation projection.
//!
//! A fixed cost billed every prior cycle that has not yet hit the current
//! one is a near-certain liability the live balance does not reflect yet.
//! Its projected amount is subtracted from both runway and survival inputs.

use crate::normalize::normalize;
use crate::report::UpcomingExpense;
use crate::schema::{AnalysisConfig, Transaction};
use std::collections::{HashMap, HashSet};

/// Expected next amount per fixed-cost group: the average of each group's
/// most recent (at most `recent_window`) occurrences.
pub fn expected_fixed_amounts(
    expenses: &[&Transaction],
    fixed: &HashSet<String>,
    recent_window: usize,
) -> HashMap<String, f64> {
    let mut groups: HashMap<String, Vec<&Transaction>> = HashMap::new();
    for tx in expenses {
        let name = normalize(&tx.description);
        if fixed.contains(&name) {
            groups.entry(name).or_default().push(tx);
        }
    }

    groups
        .into_iter()
        .map(|(name, mut members)| {
            members.sort_by(|a, b| b.date.cmp(&a.date));
            members.truncate(recent_window.max(1));
            let avg =
                members.iter().map(|t| t.magnitude()).sum::<f64>() / members.len() as f64;
            (name, avg)
        })
        .collect()
}

/// Fixed-cost groups seen in the prior period with zero occurrences so far
/// this period, each emitted exactly once with its projected amount.
///
/// Membership and averaging use different scopes on purpose: presence is
/// judged against the prior period, but a monthly obligation occurs once per
/// period, so its expected amount is averaged over `scope_expenses` (the
/// full analysis window) to actually cover several cycles.
pub fn project_upcoming(
    prior_expenses: &[&Transaction],
    current_expenses: &[&Transaction],
    scope_expenses: &[&Transaction],
    fixed: &HashSet<String>,
    config: &AnalysisConfig,
) -> Vec<UpcomingExpense> {
    let seen_this_period: HashSet<String> = current_expenses
        .iter()
        .map(|t| normalize(&t.description))
        .collect();
    let seen_last_period: HashSet<String> = prior_expenses
        .iter()
        .map(|t| normalize(&t.description))
        .collect();

    let mut upcoming: Vec<UpcomingExpense> =
        expected_fixed_amounts(scope_expenses, fixed, config.recent_occurrence_window)
            .into_iter()
            .filter(|(name, _)| {
                seen_last_period.contains(name) && !seen_this_period.contains(name)
            })
            .map(|(name, expected_amount)| UpcomingExpense {
                name,
                expected_amount,
            })
            .collect();

    upcoming.sort_by(|a, b| a.name.cmp(&b.name));
    upcoming
}

/// Total projected liability not yet reflected in the balance.
pub fn upcoming_overhead(upcoming: &[UpcomingExpense]) -> f64 {
    upcoming.iter().map(|u| u.expected_amount).sum()
}
