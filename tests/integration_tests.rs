use anyhow::Result;
use chrono::{Duration, NaiveDate};
use financial_health_engine::*;

fn d(date: &str) -> NaiveDate {
    date.parse().unwrap()
}

fn txn(date: NaiveDate, description: &str, amount: f64, category: Option<&str>) -> Transaction {
    Transaction {
        id: format!("{}-{}-{}", date, description, amount),
        date,
        description: description.to_string(),
        amount,
        category: category.map(|c| c.to_string()),
        notes: None,
    }
}

fn salary(date: &str) -> Transaction {
    txn(d(date), "ACME CORP SALARY", 30_000.0, None)
}

#[test]
fn test_zero_history_produces_defensive_report() {
    let analyzer = HealthAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze_as_of(&[], 1_000.0, d("2024-04-05"));

    assert!(report.upcoming_fixed_costs.is_empty());
    assert!(report.top_categories.is_empty());
    assert_eq!(report.survival_probability, 100.0);
    assert_eq!(report.period_spend, 0.0);
    assert_eq!(report.prev_period_spend, 0.0);
    assert!(report.expected_runway_days > 0.0);

    // A deeply negative balance with no volatility is a certain failure.
    let broke = analyzer.analyze_as_of(&[], -1_000.0, d("2024-04-05"));
    assert_eq!(broke.survival_probability, 0.0);
    assert_eq!(broke.expected_runway_days, 0.0);
}

#[test]
fn test_stable_deterministic_burn() {
    // 90 days of exactly 100 units/day of variable spend, no fixed costs.
    let today = d("2024-04-05");
    let start = today - Duration::days(89);
    let history: Vec<Transaction> = (0..90)
        .map(|offset| txn(start + Duration::days(offset), "CAFE BREW", -100.0, None))
        .collect();

    let analyzer = HealthAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze_as_of(&history, 3_000.0, today);

    // Constant spend: the EWMA settles exactly, volatility collapses.
    assert!(
        (report.daily_burn_rate - 100.0).abs() < 1e-6,
        "daily mean should be ~100, got {}",
        report.daily_burn_rate
    );
    assert!(report.burn_volatility.abs() < 1e-6);
    assert!(
        (report.expected_runway_days - 30.0).abs() < 1e-6,
        "expected runway should be ~30 days, got {}",
        report.expected_runway_days
    );
    assert_eq!(report.trend, TrendDirection::Stable);
}

#[test]
fn test_salary_fallback_selects_large_recent_credit() {
    // No salary keyword anywhere; one 10,000 credit 10 days ago against a
    // 5,000 threshold must anchor the period.
    let today = d("2024-04-05");
    let history = vec![
        txn(d("2024-03-26"), "FNB TRANSFER IN", 10_000.0, None),
        txn(d("2024-03-30"), "POS SHOPRITE 123", -400.0, Some("Groceries")),
    ];

    let cycle = resolve_pay_cycle(&history, &AnalysisConfig::default(), today);
    assert_eq!(cycle.period_start, d("2024-03-26"));
}

#[test]
fn test_single_large_category_increase() {
    // Prior-period groceries 1000 (inside the PTD window), current 1300:
    // a 30% swing against the 15% threshold must be flagged unstable.
    let mut config = AnalysisConfig::default();
    config.stability_amount_threshold = 100.0;

    let history = vec![
        salary("2024-03-25"),
        salary("2024-02-25"),
        txn(d("2024-03-01"), "POS SHOPRITE 123", -1_000.0, Some("Groceries")),
        txn(d("2024-03-28"), "POS SHOPRITE 456", -1_300.0, Some("Groceries")),
    ];

    let analyzer = HealthAnalyzer::new(config).unwrap();
    let report = analyzer.analyze_as_of(&history, 15_000.0, d("2024-04-05"));

    let groceries = report
        .top_categories
        .iter()
        .find(|c| c.name == "Groceries")
        .expect("Groceries should rank in top categories");
    assert!(
        (groceries.change_percentage - 30.0).abs() < 1e-6,
        "expected ~30% increase, got {}",
        groceries.change_percentage
    );
    assert!(!groceries.is_stable);
}

#[test]
fn test_missing_fixed_cost_becomes_upcoming_and_shrinks_runway() {
    // Rent was paid in the previous cycle but not yet in this one: it must
    // appear exactly once as upcoming and be deducted from the runway.
    let today = d("2024-04-05");
    let base = vec![
        salary("2024-03-25"),
        salary("2024-02-25"),
        txn(d("2024-02-28"), "RENT PAYMENT UNIT 7", -8_500.0, None),
        txn(d("2024-03-30"), "POS SHOPRITE 123", -600.0, Some("Groceries")),
    ];

    let analyzer = HealthAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze_as_of(&base, 20_000.0, today);

    assert_eq!(report.upcoming_fixed_costs.len(), 1);
    assert_eq!(report.upcoming_fixed_costs[0].name, "RENT UNIT");
    assert!((report.upcoming_fixed_costs[0].expected_amount - 8_500.0).abs() < 1e-9);

    // Once rent shows up in the current period, it stops being upcoming.
    let mut paid = base.clone();
    paid.push(txn(d("2024-04-01"), "RENT PAYMENT UNIT 7", -8_500.0, None));
    let report_paid = analyzer.analyze_as_of(&paid, 20_000.0, today);
    assert!(report_paid.upcoming_fixed_costs.is_empty());

    // The unpaid obligation must cost runway.
    assert!(report.expected_runway_days < report_paid.expected_runway_days);
}

#[test]
fn test_upcoming_amount_reflects_escalating_rent() {
    // Rent climbed 8000 -> 8200 -> 8400 across three cycles and is unpaid
    // this cycle: the projection must average the cycles, not just repeat
    // the most recent payment.
    let today = d("2024-04-05");
    let history = vec![
        salary("2024-01-25"),
        salary("2024-02-25"),
        salary("2024-03-25"),
        txn(d("2024-01-10"), "RENT PAYMENT UNIT 7", -8_000.0, None),
        txn(d("2024-02-10"), "RENT PAYMENT UNIT 7", -8_200.0, None),
        txn(d("2024-03-10"), "RENT PAYMENT UNIT 7", -8_400.0, None),
    ];

    let analyzer = HealthAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze_as_of(&history, 25_000.0, today);

    assert_eq!(report.upcoming_fixed_costs.len(), 1);
    assert_eq!(report.upcoming_fixed_costs[0].name, "RENT UNIT");
    assert!(
        (report.upcoming_fixed_costs[0].expected_amount - 8_200.0).abs() < 1e-9,
        "expected the three-cycle average, got {}",
        report.upcoming_fixed_costs[0].expected_amount
    );
}

#[test]
fn test_lower_degrees_of_freedom_is_more_conservative() {
    // Noisy variable spend so the volatility estimate is nonzero, then the
    // same history scored under fat and thin tails.
    let today = d("2024-04-05");
    let start = today - Duration::days(89);
    let mut history: Vec<Transaction> = (0..90)
        .map(|offset| {
            let amount = if offset % 2 == 0 { -40.0 } else { -260.0 };
            txn(start + Duration::days(offset), "CAFE BREW", amount, None)
        })
        .collect();
    history.push(salary("2024-03-25"));
    history.push(salary("2024-02-25"));

    let fat_config = AnalysisConfig {
        degrees_of_freedom: 2.5,
        ..AnalysisConfig::default()
    };
    let thin_config = AnalysisConfig {
        degrees_of_freedom: 30.0,
        ..AnalysisConfig::default()
    };

    let fat = HealthAnalyzer::new(fat_config)
        .unwrap()
        .analyze_as_of(&history, 20_000.0, today);
    let thin = HealthAnalyzer::new(thin_config)
        .unwrap()
        .analyze_as_of(&history, 20_000.0, today);

    assert!(fat.burn_volatility > 0.0);
    assert!(
        fat.survival_probability < thin.survival_probability,
        "fat = {}, thin = {}",
        fat.survival_probability,
        thin.survival_probability
    );
}

#[test]
fn test_behavioral_fixed_cost_detection_end_to_end() {
    // A gym debit order with no fixed-cost keyword: repetition plus the
    // debit-order marker must classify it as fixed, pulling it out of the
    // discretionary category analysis.
    let today = d("2024-04-05");
    let history = vec![
        salary("2024-03-25"),
        salary("2024-02-25"),
        salary("2024-01-25"),
        txn(d("2024-01-28"), "DEBIT ORDER VIRGINACTIVE", -450.0, None),
        txn(d("2024-02-28"), "DEBIT ORDER VIRGINACTIVE", -450.0, None),
        txn(d("2024-03-28"), "DEBIT ORDER VIRGINACTIVE", -450.0, Some("Fitness")),
        txn(d("2024-03-30"), "POS SHOPRITE 123", -900.0, Some("Groceries")),
    ];

    let analyzer = HealthAnalyzer::new(AnalysisConfig::default()).unwrap();
    let report = analyzer.analyze_as_of(&history, 20_000.0, today);

    assert!(
        !report.top_categories.iter().any(|c| c.name == "Fitness"),
        "behaviorally-fixed group must not appear as a discretionary category"
    );
    assert!(report.top_categories.iter().any(|c| c.name == "Groceries"));

    // It is already billed this period, so not upcoming either.
    assert!(report.upcoming_fixed_costs.is_empty());
}

#[test]
fn test_report_serializes_flat() -> Result<()> {
    let today = d("2024-04-05");
    let history = vec![
        salary("2024-03-25"),
        txn(d("2024-03-28"), "POS SHOPRITE 123", -600.0, Some("Groceries")),
    ];
    let report = analyze_financial_health(&history, 12_000.0, &AnalysisConfig::default(), today)?;

    let json = report.to_json()?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    assert!(value["survival_probability"].is_number());
    assert!(value["expected_runway_days"].is_number());
    assert!(value["top_categories"].is_array());
    assert_eq!(value["generated_on"], "2024-04-05");
    Ok(())
}

#[test]
fn test_analysis_is_deterministic() -> Result<()> {
    let today = d("2024-04-05");
    let history = vec![
        salary("2024-03-25"),
        salary("2024-02-25"),
        txn(d("2024-03-28"), "POS SHOPRITE 123", -600.0, Some("Groceries")),
        txn(d("2024-02-28"), "RENT PAYMENT UNIT 7", -8_500.0, None),
    ];
    let analyzer = HealthAnalyzer::new(AnalysisConfig::default())?;

    let a = analyzer.analyze_as_of(&history, 12_000.0, today);
    let b = analyzer.analyze_as_of(&history, 12_000.0, today);
    assert_eq!(a.to_json()?, b.to_json()?);
    Ok(())
}
