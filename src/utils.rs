use crate::schema::Transaction;
use chrono::{Days, NaiveDate};

/// Inclusive date containment test used for period filtering.
pub fn in_range(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    date >= start && date <= end
}

/// Expenses (amount < 0) falling within [start, end], borrowed from `history`.
pub fn expenses_between<'a>(
    history: &'a [Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&'a Transaction> {
    history
        .iter()
        .filter(|t| t.is_expense() && in_range(t.date, start, end))
        .collect()
}

/// Sum of expense magnitudes. Callers must pass a single-polarity slice;
/// mixing credits into an expense sum is a logic error upstream.
pub fn sum_magnitudes(expenses: &[&Transaction]) -> f64 {
    expenses.iter().map(|t| t.magnitude()).sum()
}

pub fn days_ago(today: NaiveDate, days: i64) -> NaiveDate {
    today - chrono::Duration::days(days)
}

pub fn shift_back_one_year(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(365)).unwrap_or(date)
}

/// Case-insensitive containment against a keyword table.
pub fn matches_any_keyword(text: &str, keywords: &[String]) -> bool {
    let upper = text.to_uppercase();
    keywords.iter().any(|k| upper.contains(&k.to_uppercase()))
}

/// Exact (case-insensitive) membership against a label table.
pub fn matches_any_label(label: Option<&str>, labels: &[String]) -> bool {
    match label {
        Some(l) => labels.iter().any(|c| c.eq_ignore_ascii_case(l)),
        None => false,
    }
}
