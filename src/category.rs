//! Category-level variance analysis.
//!
//! Comparing a partial current period against a partial prior period produces
//! absurd artifacts ("700% increase") whenever the prior period's spending
//! was front- or back-loaded. The hybrid baseline falls back to the full
//! prior-period figure when the period-to-date figure is implausibly small.

use crate::normalize::UNCATEGORIZED;
use crate::recurring::is_fixed_cost_keyword;
use crate::report::CategorySpend;
use crate::schema::{AnalysisConfig, Transaction};
use std::collections::HashMap;

/// Spend per category label (expenses only; missing labels pool under the
/// normalizer's sentinel).
pub fn spend_by_category(expenses: &[&Transaction]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for tx in expenses {
        let name = tx
            .category
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());
        *totals.entry(name).or_insert(0.0) += tx.magnitude();
    }
    totals
}

/// Prior-period-to-date spend, unless it is suspiciously small relative to
/// the full prior period, in which case the full figure is used.
fn hybrid_baseline(ptd: f64, full_prior: f64, ratio: f64) -> f64 {
    if full_prior > 0.0 && ptd < full_prior * ratio {
        full_prior
    } else {
        ptd
    }
}

/// Top-N current-period categories compared against their hybrid baselines.
///
/// Callers pass variable (non-fixed) expenses; fixed obligations are handled
/// by the upcoming-cost projector and would drown the discretionary signal
/// here. The `is_fixed_cost` flag is still derived from the label itself so
/// that fixed-sounding categories the merchant heuristics missed stay
/// visible to consumers.
pub fn analyze_categories(
    current: &[&Transaction],
    prior_full: &[&Transaction],
    prior_ptd: &[&Transaction],
    config: &AnalysisConfig,
) -> Vec<CategorySpend> {
    let current_totals = spend_by_category(current);
    let prior_totals = spend_by_category(prior_full);
    let ptd_totals = spend_by_category(prior_ptd);

    let mut ranked: Vec<(String, f64)> = current_totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(config.top_category_count);

    ranked
        .into_iter()
        .map(|(name, amount)| {
            let full_prior = prior_totals.get(&name).copied().unwrap_or(0.0);
            let ptd = ptd_totals.get(&name).copied().unwrap_or(0.0);
            let baseline = hybrid_baseline(ptd, full_prior, config.hybrid_baseline_ratio);

            let change_amount = amount - baseline;
            let change_percentage = if baseline > 0.0 {
                change_amount / baseline * 100.0
            } else if amount > 0.0 {
                100.0
            } else {
                0.0
            };

            let is_stable = change_percentage.abs() < config.stability_percentage_threshold
                || change_amount.abs() < config.stability_amount_threshold;

            CategorySpend {
                is_fixed_cost: is_fixed_cost_keyword(&name, config),
                is_stable,
                change_percentage,
                change_amount,
                amount,
                name,
            }
        })
        .collect()
}
