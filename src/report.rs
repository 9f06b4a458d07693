use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Direction of the variable burn rate relative to its window average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// One category's spend this period compared against its hybrid baseline.
/// Recomputed on every run; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategorySpend {
    pub name: String,

    #[schemars(description = "Spend in this category during the current period")]
    pub amount: f64,

    #[schemars(description = "Absolute change versus the hybrid baseline")]
    pub change_amount: f64,

    #[schemars(
        description = "Percentage change versus the hybrid baseline (100 when the baseline was zero and spend is nonzero)"
    )]
    pub change_percentage: f64,

    #[schemars(
        description = "True when the swing is small either relatively or absolutely"
    )]
    pub is_stable: bool,

    #[schemars(description = "True when the category label itself names a fixed obligation")]
    pub is_fixed_cost: bool,
}

/// A fixed obligation seen last period but not yet billed this period.
/// A forecast, not a ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct UpcomingExpense {
    pub name: String,

    #[schemars(description = "Average of the group's most recent occurrences")]
    pub expected_amount: f64,
}

/// Terminal output of one analysis run. Constructed once, never mutated.
///
/// Intentionally flat so it serializes cleanly for a downstream
/// natural-language summarizer or chart renderer; it carries no
/// transaction-level detail beyond the top categories and upcoming costs.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FinancialHealthReport {
    #[schemars(description = "Date the analysis was run")]
    pub generated_on: NaiveDate,

    #[schemars(description = "Signed balance across all the owner's accounts")]
    pub current_balance: f64,

    #[schemars(description = "EWMA of daily variable (discretionary) spend")]
    pub daily_burn_rate: f64,

    #[schemars(description = "EWMA standard deviation of daily variable spend")]
    pub burn_volatility: f64,

    #[schemars(
        description = "Variable burn plus fixed costs amortized per day. Fixed and variable burn are combined exactly once, here."
    )]
    pub true_daily_burn: f64,

    #[schemars(description = "Runway in days assuming burn one std-dev above expected")]
    pub safe_runway_days: f64,

    #[schemars(description = "Runway in days at the expected true daily burn")]
    pub expected_runway_days: f64,

    #[schemars(description = "Runway in days assuming burn one std-dev below expected")]
    pub optimistic_runway_days: f64,

    #[schemars(
        description = "One-tailed 95% spend shock over the days remaining until the next salary"
    )]
    pub value_at_risk: f64,

    pub trend: TrendDirection,

    #[schemars(description = "Total spend so far this pay period")]
    pub period_spend: f64,

    #[schemars(description = "Hybrid-baseline spend for the previous pay period")]
    pub prev_period_spend: f64,

    #[schemars(description = "Spend over the equivalent elapsed window one year ago")]
    pub same_period_last_year_spend: f64,

    #[schemars(description = "Projected total spend by the end of the current cycle")]
    pub projected_cycle_end_spend: f64,

    #[schemars(
        description = "Balance expected on the next salary date after burn and upcoming fixed costs"
    )]
    pub projected_balance_at_next_salary: f64,

    #[schemars(
        description = "Probability (0-100) that the balance survives until the next salary, under a fat-tailed Student's t model"
    )]
    pub survival_probability: f64,

    pub days_until_next_salary: i64,
    pub days_into_period: i64,
    pub avg_cycle_days: i64,

    #[schemars(description = "Top discretionary categories this period with baseline comparison")]
    pub top_categories: Vec<CategorySpend>,

    #[schemars(description = "Fixed obligations expected before the next salary")]
    pub upcoming_fixed_costs: Vec<UpcomingExpense>,
}

impl FinancialHealthReport {
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(FinancialHealthReport)
    }
}
