//! Recurring / fixed-cost classification.
//!
//! Merchant categories from banking APIs are unreliable (every card swipe
//! may share one generic label), so classification is two-tier: a keyword
//! table for the obvious obligations, and a behavioral heuristic (repeated
//! occurrence plus debit-order/EFT markers) as the fallback signal of truth.

use crate::normalize::normalize;
use crate::schema::{AnalysisConfig, Transaction};
use crate::utils::{matches_any_keyword, matches_any_label};
use std::collections::{HashMap, HashSet};

/// Pure keyword containment test on an already-normalized merchant name.
pub fn is_fixed_cost_keyword(normalized_name: &str, config: &AnalysisConfig) -> bool {
    matches_any_keyword(normalized_name, &config.fixed_cost_keywords)
}

/// The set of normalized merchant names treated as fixed obligations for
/// the whole report. A group qualifies by keyword, or behaviorally: it
/// repeats more than `recurring_min_occurrences` times AND at least one
/// member looks like a scheduled collection (debit-order marker in the raw
/// description, or a transfer/scheduled category label).
pub fn classify_recurring(expenses: &[&Transaction], config: &AnalysisConfig) -> HashSet<String> {
    let mut groups: HashMap<String, Vec<&Transaction>> = HashMap::new();
    for tx in expenses {
        groups.entry(normalize(&tx.description)).or_default().push(tx);
    }

    groups
        .into_iter()
        .filter(|(name, members)| {
            if is_fixed_cost_keyword(name, config) {
                return true;
            }
            members.len() > config.recurring_min_occurrences
                && members.iter().any(|t| {
                    matches_any_keyword(&t.description, &config.debit_order_markers)
                        || matches_any_label(
                            t.category.as_deref(),
                            &config.transfer_category_labels,
                        )
                })
        })
        .map(|(name, _)| name)
        .collect()
}
