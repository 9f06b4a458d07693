//! Variable-spend burn-rate estimation.
//!
//! A recursive exponentially weighted mean/variance over daily spend adapts
//! continuously to behavioral shifts (no hard window-cutoff discontinuity)
//! and yields the volatility estimate the survival model needs for free.

use crate::schema::Transaction;
use crate::utils::days_ago;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnEstimate {
    /// EWMA of daily variable spend. Floored to 1.0 so downstream runway
    /// division is always defined.
    pub daily_mean: f64,
    /// EWMA standard deviation of daily variable spend.
    pub daily_std_dev: f64,
    /// Plain window average, kept for trend comparison.
    pub simple_daily_mean: f64,
}

/// Summed expense magnitudes per day over the trailing `window_days` ending
/// at `today`, with missing days explicit as zero.
pub fn daily_spend_series(
    variable_expenses: &[&Transaction],
    window_days: i64,
    today: NaiveDate,
) -> Vec<f64> {
    let start = days_ago(today, window_days - 1);

    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for tx in variable_expenses {
        if tx.date >= start && tx.date <= today {
            *by_day.entry(tx.date).or_insert(0.0) += tx.magnitude();
        }
    }

    (0..window_days)
        .map(|offset| {
            let day = start + Duration::days(offset);
            by_day.get(&day).copied().unwrap_or(0.0)
        })
        .collect()
}

/// Fold the recursive EWMA mean/variance over an ordered (oldest to newest)
/// daily series. Returns (mean, variance).
pub fn ewma_mean_variance(series: &[f64], alpha: f64) -> (f64, f64) {
    let mut iter = series.iter();
    let first = match iter.next() {
        Some(v) => *v,
        None => return (0.0, 0.0),
    };

    iter.fold((first, 0.0), |(mean, var), &spend| {
        let delta = spend - mean;
        let next_mean = mean + alpha * delta;
        let next_var = (1.0 - alpha) * (var + alpha * delta * delta);
        (next_mean, next_var)
    })
}

pub fn estimate_burn(
    variable_expenses: &[&Transaction],
    window_days: i64,
    alpha: f64,
    today: NaiveDate,
) -> BurnEstimate {
    let series = daily_spend_series(variable_expenses, window_days, today);
    let (mean, variance) = ewma_mean_variance(&series, alpha);

    let total: f64 = series.iter().sum();
    let simple_daily_mean = if series.is_empty() {
        0.0
    } else {
        total / series.len() as f64
    };

    BurnEstimate {
        daily_mean: if mean <= 0.0 { 1.0 } else { mean },
        daily_std_dev: variance.max(0.0).sqrt(),
        simple_daily_mean,
    }
}
