use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Transaction {
    #[schemars(description = "Opaque identifier assigned by the source banking system")]
    pub id: String,

    #[schemars(description = "Posting date of the transaction in YYYY-MM-DD format")]
    pub date: NaiveDate,

    #[schemars(
        description = "Raw merchant/narrative string as supplied by the bank (e.g., 'POS PURCHASE WOOLWORTHS 1234 CAPE TOWN ZA')"
    )]
    pub description: String,

    #[schemars(
        description = "Signed amount. Negative = money out (expense), positive = money in (income). The sign is the sole truth for expense/income classification."
    )]
    pub amount: f64,

    #[schemars(
        description = "Optional category label from the source system. Advisory only; may be missing or unreliable."
    )]
    pub category: Option<String>,

    #[schemars(description = "Optional free-text notes attached to the transaction")]
    pub notes: Option<String>,
}

impl Transaction {
    /// Money out, regardless of sign convention quirks downstream.
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    /// Expense magnitude. Only meaningful for expenses.
    pub fn magnitude(&self) -> f64 {
        self.amount.abs()
    }
}

/// Tunable thresholds and keyword tables for one analysis run.
///
/// Every knob here is deliberately exposed rather than hardcoded: the
/// hybrid-baseline and stability heuristics in particular need empirical
/// recalibration per bank/market.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnalysisConfig {
    #[schemars(
        description = "Case-insensitive substrings identifying salary credits (e.g., 'SALARY', 'PAYROLL')"
    )]
    pub salary_keywords: Vec<String>,

    #[schemars(
        description = "Case-insensitive substrings identifying fixed, non-discretionary obligations by merchant name (e.g., 'RENT', 'INSURANCE')"
    )]
    pub fixed_cost_keywords: Vec<String>,

    #[schemars(
        description = "Raw-description markers of scheduled/collected payments (debit orders, EFTs). Used as the behavioral fallback when category labels are unreliable."
    )]
    pub debit_order_markers: Vec<String>,

    #[schemars(
        description = "Category labels that denote internal transfers or scheduled payments"
    )]
    pub transfer_category_labels: Vec<String>,

    #[schemars(description = "Category labels that denote income")]
    pub income_category_labels: Vec<String>,

    #[schemars(
        description = "EWMA smoothing factor alpha in (0, 1). Higher values react faster to recent spend."
    )]
    pub smoothing_factor: f64,

    #[schemars(
        description = "Length of the trailing burn-rate analysis window in days"
    )]
    pub analysis_window_days: i64,

    #[schemars(
        description = "If prior period-to-date spend for a category is below this ratio of the full prior period, the full-period figure is used as the comparison baseline instead. Guards against partial-period skew."
    )]
    pub hybrid_baseline_ratio: f64,

    #[schemars(
        description = "A category change below this percentage magnitude is considered stable"
    )]
    pub stability_percentage_threshold: f64,

    #[schemars(
        description = "A category change below this absolute amount is considered stable even when the percentage swing is large"
    )]
    pub stability_amount_threshold: f64,

    #[schemars(description = "Lower clamp for the estimated pay-cycle length in days")]
    pub min_cycle_days: i64,

    #[schemars(description = "Upper clamp for the estimated pay-cycle length in days")]
    pub max_cycle_days: i64,

    #[schemars(
        description = "Cycle length assumed when fewer than two salary events exist"
    )]
    pub default_cycle_days: i64,

    #[schemars(
        description = "When no salary-like transaction can be found at all, assume the user was paid this many days ago"
    )]
    pub assumed_days_since_salary: i64,

    #[schemars(
        description = "How far back to look for a large-credit salary fallback when no keyword matches"
    )]
    pub salary_fallback_lookback_days: i64,

    #[schemars(
        description = "Minimum credit amount for the salary fallback to accept a transaction as the pay anchor"
    )]
    pub salary_fallback_min_amount: f64,

    #[schemars(
        description = "A merchant group must occur strictly more than this many times in the analysis window before behavioral recurring detection applies"
    )]
    pub recurring_min_occurrences: usize,

    #[schemars(
        description = "Degrees of freedom for the Student's t solvency model. Lower = fatter tails = more conservative. Must be > 1."
    )]
    pub degrees_of_freedom: f64,

    #[schemars(
        description = "Relative band around the simple window average inside which the burn trend is labelled Stable"
    )]
    pub trend_sensitivity: f64,

    #[schemars(description = "How many top spend categories to include in the report")]
    pub top_category_count: usize,

    #[schemars(
        description = "Days over which monthly fixed costs are amortized into the daily burn"
    )]
    pub fixed_cost_amortization_days: f64,

    #[schemars(
        description = "How many recent occurrences of a fixed-cost group are averaged to project its next amount"
    )]
    pub recent_occurrence_window: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            salary_keywords: string_vec(&["SALARY", "SALARIS", "WAGES", "PAYROLL"]),
            fixed_cost_keywords: string_vec(&[
                "RENT",
                "BOND",
                "INSURANCE",
                "MEDICAL AID",
                "VEHICLE",
                "GYM",
                "NETFLIX",
                "SPOTIFY",
                "LEVY",
                "SCHOOL FEES",
            ]),
            debit_order_markers: string_vec(&[
                "DEBIT ORDER",
                "DEBICHECK",
                "NAEDO",
                "STOP ORDER",
                "EFT",
                "DEBIT",
            ]),
            transfer_category_labels: string_vec(&[
                "Transfer",
                "Scheduled Payment",
                "Debit Order",
            ]),
            income_category_labels: string_vec(&["Income", "Salary"]),
            smoothing_factor: 0.2,
            analysis_window_days: 90,
            hybrid_baseline_ratio: 0.25,
            stability_percentage_threshold: 15.0,
            stability_amount_threshold: 250.0,
            min_cycle_days: 20,
            max_cycle_days: 45,
            default_cycle_days: 30,
            assumed_days_since_salary: 28,
            salary_fallback_lookback_days: 35,
            salary_fallback_min_amount: 5000.0,
            recurring_min_occurrences: 2,
            degrees_of_freedom: 5.0,
            trend_sensitivity: 0.1,
            top_category_count: 5,
            fixed_cost_amortization_days: 30.0,
            recent_occurrence_window: 3,
        }
    }
}

impl AnalysisConfig {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(AnalysisConfig)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

fn string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
