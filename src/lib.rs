//! # Financial Health Engine
//!
//! A library for turning a raw bank transaction ledger and a current balance
//! into a probabilistic assessment of short-term solvency: burn rate, runway,
//! upcoming obligations, category-level spend anomalies, and a fat-tailed
//! survival probability until the next salary.
//!
//! ## Core Concepts
//!
//! - **Pay cycle**: periods are anchored to detected salary events, not
//!   calendar months, so mid-cycle comparisons stay like-for-like
//! - **Fixed vs variable spend**: recurring obligations are classified by
//!   keyword and behavioral heuristics, then excluded from the discretionary
//!   burn estimate and amortized back in exactly once
//! - **EWMA burn**: an exponentially weighted mean/variance of daily variable
//!   spend adapts to behavioral shifts and yields volatility for free
//! - **Survival probability**: a Student's t model (fat tails) of whether the
//!   projected balance survives until the next income event
//!
//! The engine is a pure function of (history, balance, configuration): no
//! I/O, no caching, no shared mutable state. Empty or degenerate input
//! yields a defensive zero-valued report rather than an error.
//!
//! ## Example
//!
//! ```rust,ignore
//! use financial_health_engine::{AnalysisConfig, HealthAnalyzer, Transaction};
//! use chrono::NaiveDate;
//!
//! let analyzer = HealthAnalyzer::new(AnalysisConfig::default())?;
//! let report = analyzer.analyze_as_of(
//!     &history,
//!     12_500.0,
//!     NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
//! );
//! println!("{}", report.to_json()?);
//! ```

pub mod burn;
pub mod category;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod recurring;
pub mod report;
pub mod schema;
pub mod survival;
pub mod upcoming;
pub mod utils;

pub use burn::{estimate_burn, BurnEstimate};
pub use category::analyze_categories;
pub use cycle::{resolve_pay_cycle, PayCycle};
pub use engine::assemble_report;
pub use error::{HealthEngineError, Result};
pub use normalize::{normalize, UNCATEGORIZED};
pub use recurring::{classify_recurring, is_fixed_cost_keyword};
pub use report::{CategorySpend, FinancialHealthReport, TrendDirection, UpcomingExpense};
pub use schema::{AnalysisConfig, Transaction};
pub use survival::{normal_cdf, students_t_cdf, survival_probability};
pub use upcoming::project_upcoming;

use chrono::{NaiveDate, Utc};
use log::{debug, info};

/// Validated entry point around the report assembler.
///
/// Construction validates the configuration once; analysis itself never
/// fails, because a "no data yet" state is a normal operating condition.
pub struct HealthAnalyzer {
    config: AnalysisConfig,
}

impl HealthAnalyzer {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        validate_config(&config)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze against an explicit "today", keeping the engine referentially
    /// transparent and testable.
    pub fn analyze_as_of(
        &self,
        history: &[Transaction],
        current_balance: f64,
        today: NaiveDate,
    ) -> FinancialHealthReport {
        info!(
            "Analyzing financial health: {} transactions, balance {:.2}, as of {}",
            history.len(),
            current_balance,
            today
        );
        let report = engine::assemble_report(history, current_balance, &self.config, today);
        debug!(
            "Report assembled: burn {:.2}/day, survival {:.1}%, {} upcoming fixed costs",
            report.daily_burn_rate,
            report.survival_probability,
            report.upcoming_fixed_costs.len()
        );
        report
    }

    /// Analyze as of the current UTC date.
    pub fn analyze(
        &self,
        history: &[Transaction],
        current_balance: f64,
    ) -> FinancialHealthReport {
        self.analyze_as_of(history, current_balance, Utc::now().date_naive())
    }
}

/// One-shot convenience wrapper.
pub fn analyze_financial_health(
    history: &[Transaction],
    current_balance: f64,
    config: &AnalysisConfig,
    today: NaiveDate,
) -> Result<FinancialHealthReport> {
    let analyzer = HealthAnalyzer::new(config.clone())?;
    Ok(analyzer.analyze_as_of(history, current_balance, today))
}

fn validate_config(config: &AnalysisConfig) -> Result<()> {
    if !(config.smoothing_factor > 0.0 && config.smoothing_factor < 1.0) {
        return Err(HealthEngineError::InvalidSmoothingFactor(
            config.smoothing_factor,
        ));
    }

    if config.analysis_window_days <= 0 {
        return Err(HealthEngineError::InvalidAnalysisWindow(
            config.analysis_window_days,
        ));
    }

    if config.min_cycle_days < 1
        || config.min_cycle_days > config.default_cycle_days
        || config.default_cycle_days > config.max_cycle_days
    {
        return Err(HealthEngineError::InvalidCycleBounds {
            min: config.min_cycle_days,
            default: config.default_cycle_days,
            max: config.max_cycle_days,
        });
    }

    if config.degrees_of_freedom <= 1.0 {
        return Err(HealthEngineError::InvalidDegreesOfFreedom(
            config.degrees_of_freedom,
        ));
    }

    if !(0.0..=1.0).contains(&config.hybrid_baseline_ratio) {
        return Err(HealthEngineError::InvalidBaselineRatio(
            config.hybrid_baseline_ratio,
        ));
    }

    if config.trend_sensitivity < 0.0 {
        return Err(HealthEngineError::InvalidTrendSensitivity(
            config.trend_sensitivity,
        ));
    }

    Ok(())
}
