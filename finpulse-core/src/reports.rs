//! Transaction listings and report series: filtered history, spending by category,
//! and month-by-month income against expenses.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::finance::{Transaction, TransactionKind};
use crate::time::YearMonth;

/// Criteria for listing transactions; `None` matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    pub kind: Option<TransactionKind>,
    /// Compared case-insensitively
    pub category: Option<String>,
    pub month: Option<YearMonth>,
}

impl TransactionFilter {
    pub fn matches(&self, t: &Transaction) -> bool {
        self.kind.is_none_or(|k| t.kind == k)
            && self
                .category
                .as_deref()
                .is_none_or(|c| t.category.eq_ignore_ascii_case(c.trim()))
            && self.month.is_none_or(|m| m.contains(t.date))
    }
}

/// Matching transactions, newest first. Same-day entries are ordered by id.
pub fn filter_transactions(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
    out
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

/// Expenses of `month` grouped by category, largest first.
pub fn expenses_by_category(transactions: &[Transaction], month: YearMonth) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, f64> = HashMap::new();
    for t in transactions {
        if t.is_expense() && month.contains(t.date) {
            *totals.entry(t.category.as_str()).or_default() += t.amount;
        }
    }

    let mut out: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            category: category.to_string(),
            amount,
        })
        .collect();
    out.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
    });
    out
}

/// How far back the trend series reaches
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "12m")]
    TwelveMonths,
    #[serde(rename = "ytd")]
    YearToDate,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::SixMonths => "6m",
            Timeframe::TwelveMonths => "12m",
            Timeframe::YearToDate => "ytd",
        }
    }

    /// First month of the window ending at `current`
    pub fn start(&self, current: YearMonth) -> YearMonth {
        match self {
            Timeframe::SixMonths => current.add_months(-5),
            Timeframe::TwelveMonths => current.add_months(-11),
            Timeframe::YearToDate => YearMonth {
                year: current.year,
                month: 1,
            },
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "6m" => Ok(Timeframe::SixMonths),
            "12m" => Ok(Timeframe::TwelveMonths),
            "ytd" => Ok(Timeframe::YearToDate),
            other => Err(anyhow::anyhow!("unknown timeframe '{other}' (expected 6m, 12m or ytd)")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub month: YearMonth,
    pub income: f64,
    pub expenses: f64,
}

/// Income and expenses per month across the window ending at `current`.
///
/// Every month in the window is present, zero-filled when nothing was recorded.
/// Transactions outside the window are ignored.
pub fn monthly_trend(
    transactions: &[Transaction],
    timeframe: Timeframe,
    current: YearMonth,
) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = timeframe
        .start(current)
        .through(current)
        .into_iter()
        .map(|month| TrendPoint {
            month,
            income: 0.0,
            expenses: 0.0,
        })
        .collect();

    for t in transactions {
        let month = YearMonth::containing(t.date);
        let Some(point) = points.iter_mut().find(|p| p.month == month) else {
            continue;
        };
        match t.kind {
            TransactionKind::Income => point.income += t.amount,
            TransactionKind::Expense => point.expenses += t.amount,
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(id: &str, y: i32, m: u32, d: u32, amount: f64, kind: TransactionKind, cat: &str) -> Transaction {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        Transaction::new(id, date, id, amount, kind, cat)
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("pay", 2026, 2, 1, 5000.0, TransactionKind::Income, "Salary"),
            tx("rent", 2026, 2, 5, 1500.0, TransactionKind::Expense, "Housing"),
            tx("market", 2026, 2, 7, 300.0, TransactionKind::Expense, "Food"),
            tx("ifood", 2026, 2, 9, 80.0, TransactionKind::Expense, "food"),
            tx("old-rent", 2025, 12, 5, 1400.0, TransactionKind::Expense, "Housing"),
            tx("old-pay", 2025, 6, 1, 4000.0, TransactionKind::Income, "Salary"),
        ]
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_filter_newest_first() {
        let all = filter_transactions(&sample(), &TransactionFilter::default());
        assert_eq!(all.len(), 6);
        assert_eq!(all[0].id, "ifood");
        assert_eq!(all[5].id, "old-pay");
    }

    #[test]
    fn test_filter_combines_criteria() {
        let f = TransactionFilter {
            kind: Some(TransactionKind::Expense),
            category: Some("FOOD".into()),
            month: Some(ym(2026, 2)),
        };
        let ids: Vec<_> = filter_transactions(&sample(), &f).into_iter().map(|t| t.id).collect();
        assert_eq!(ids, ["ifood", "market"]);

        let housing_feb = TransactionFilter {
            category: Some("Housing".into()),
            month: Some(ym(2026, 2)),
            ..TransactionFilter::default()
        };
        assert_eq!(filter_transactions(&sample(), &housing_feb).len(), 1);
    }

    #[test]
    fn test_expenses_by_category_largest_first() {
        let totals = expenses_by_category(&sample(), ym(2026, 2));
        let cats: Vec<_> = totals.iter().map(|c| c.category.as_str()).collect();
        // categories are grouped exactly as recorded
        assert_eq!(cats, ["Housing", "Food", "food"]);
        assert_eq!(totals[0].amount, 1500.0);
        assert!(expenses_by_category(&sample(), ym(2026, 3)).is_empty());
    }

    #[test]
    fn test_trend_window_start() {
        let feb = ym(2026, 2);
        assert_eq!(Timeframe::SixMonths.start(feb), ym(2025, 9));
        assert_eq!(Timeframe::TwelveMonths.start(feb), ym(2025, 3));
        assert_eq!(Timeframe::YearToDate.start(feb), ym(2026, 1));
    }

    #[test]
    fn test_trend_fills_empty_months() {
        let points = monthly_trend(&sample(), Timeframe::SixMonths, ym(2026, 2));
        let months: Vec<String> = points.iter().map(|p| p.month.to_string()).collect();
        assert_eq!(months, ["2025-09", "2025-10", "2025-11", "2025-12", "2026-01", "2026-02"]);

        assert_eq!(points[0].income, 0.0);
        assert_eq!(points[3].expenses, 1400.0);
        assert_eq!(points[4], TrendPoint { month: ym(2026, 1), income: 0.0, expenses: 0.0 });
        assert_eq!(points[5].income, 5000.0);
        assert_eq!(points[5].expenses, 1880.0);
    }

    #[test]
    fn test_trend_ignores_outside_window() {
        let ytd = monthly_trend(&sample(), Timeframe::YearToDate, ym(2026, 2));
        assert_eq!(ytd.len(), 2);
        let total_income: f64 = ytd.iter().map(|p| p.income).sum();
        assert_eq!(total_income, 5000.0);

        let year = monthly_trend(&sample(), Timeframe::TwelveMonths, ym(2026, 2));
        assert_eq!(year.len(), 12);
        assert_eq!(year.iter().map(|p| p.income).sum::<f64>(), 9000.0);
    }

    #[test]
    fn test_timeframe_parse() {
        assert_eq!("YTD".parse::<Timeframe>().unwrap(), Timeframe::YearToDate);
        assert!("3m".parse::<Timeframe>().is_err());
    }
}
