//! Fat-tailed solvency model and runway math.
//!
//! Variance-only models understate rare large expenses, so the solvency
//! probability uses a Student's t CDF instead of a normal one. The t CDF is
//! evaluated via Bailey's t-to-z transform composed with the
//! Abramowitz-Stegun rational approximation of the normal CDF
//! (absolute error < 1.5e-7), which keeps the crate dependency-free on the
//! numerics side while staying well within reporting precision.

use std::f64::consts::FRAC_1_SQRT_2;

/// One-tailed 95% normal quantile used for the value-at-risk figure.
const Z_95: f64 = 1.645;

/// Abramowitz & Stegun 7.1.26 rational approximation of erf(x).
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    sign * (1.0 - poly * (-x * x).exp())
}

/// Standard normal CDF.
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z * FRAC_1_SQRT_2))
}

/// Student's t CDF via Bailey's normal approximation, valid for dof > 1.
pub fn students_t_cdf(t: f64, degrees_of_freedom: f64) -> f64 {
    let nu = degrees_of_freedom;
    let z = t * (1.0 - 1.0 / (4.0 * nu)) / (1.0 + t * t / (2.0 * nu)).sqrt();
    normal_cdf(z)
}

/// Probability (0-100) that the projected balance stays non-negative until
/// the next salary. Zero volatility degenerates to a binary outcome.
pub fn survival_probability(
    projected_balance: f64,
    daily_std_dev: f64,
    days_until_next_salary: i64,
    degrees_of_freedom: f64,
) -> f64 {
    if daily_std_dev <= 0.0 {
        return if projected_balance > 0.0 { 100.0 } else { 0.0 };
    }

    let horizon = (days_until_next_salary.max(1) as f64).sqrt();
    let t = projected_balance / (daily_std_dev * horizon);
    (students_t_cdf(t, degrees_of_freedom) * 100.0).clamp(0.0, 100.0)
}

/// Spend shock at 95% confidence over the to-salary horizon.
pub fn value_at_risk(daily_std_dev: f64, days_until_next_salary: i64) -> f64 {
    Z_95 * daily_std_dev * (days_until_next_salary.max(1) as f64).sqrt()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunwayEstimate {
    pub safe_days: f64,
    pub expected_days: f64,
    pub optimistic_days: f64,
}

/// Runway in days for the balance net of upcoming fixed obligations, at the
/// expected burn and one volatility band to either side. Divisors are
/// floored at 1.0 so a near-zero burn cannot blow the figures up.
pub fn runway(
    current_balance: f64,
    upcoming_overhead: f64,
    true_daily_burn: f64,
    daily_std_dev: f64,
) -> RunwayEstimate {
    let available = current_balance - upcoming_overhead;
    let days = |burn: f64| (available / burn.max(1.0)).max(0.0);

    RunwayEstimate {
        safe_days: days(true_daily_burn + daily_std_dev),
        expected_days: days(true_daily_burn),
        optimistic_days: days(true_daily_burn - daily_std_dev),
    }
}
