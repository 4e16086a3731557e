//! Envelope budgeting: how much of each monthly envelope has been spent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::finance::{BudgetEnvelope, Transaction};
use crate::time::YearMonth;

/// Above this share of the budget an envelope is flagged
pub const WARNING_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EnvelopeStatus {
    OnTrack,
    Warning,
    Overspent,
}

impl EnvelopeStatus {
    fn for_percent(percent: f64) -> Self {
        if percent > 100.0 {
            EnvelopeStatus::Overspent
        } else if percent > WARNING_PERCENT {
            EnvelopeStatus::Warning
        } else {
            EnvelopeStatus::OnTrack
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeUsage {
    pub envelope: BudgetEnvelope,
    pub spent: f64,
    /// Negative when overspent
    pub remaining: f64,
    /// 0 for an envelope with no budget
    pub percent: f64,
    pub status: EnvelopeStatus,
}

/// Spending per envelope for `month`, in envelope order.
pub fn envelope_usage(
    envelopes: &[BudgetEnvelope],
    transactions: &[Transaction],
    month: YearMonth,
) -> Vec<EnvelopeUsage> {
    let mut spent: HashMap<&str, f64> = HashMap::new();
    for t in transactions {
        if !t.is_expense() || !month.contains(t.date) {
            continue;
        }
        if let Some(env) = t.envelope_id.as_deref() {
            *spent.entry(env).or_default() += t.amount;
        }
    }

    envelopes
        .iter()
        .map(|env| {
            let spent = spent.get(env.id.as_str()).copied().unwrap_or(0.0);
            let percent = if env.budgeted_amount > 0.0 {
                spent / env.budgeted_amount * 100.0
            } else {
                0.0
            };
            EnvelopeUsage {
                envelope: env.clone(),
                spent,
                remaining: env.budgeted_amount - spent,
                percent,
                status: EnvelopeStatus::for_percent(percent),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub total_budgeted: f64,
    pub total_spent: f64,
}

impl BudgetSummary {
    pub fn of(usage: &[EnvelopeUsage]) -> Self {
        Self {
            total_budgeted: usage.iter().map(|u| u.envelope.budgeted_amount).sum(),
            total_spent: usage.iter().map(|u| u.spent).sum(),
        }
    }

    pub fn remaining(&self) -> f64 {
        self.total_budgeted - self.total_spent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::TransactionKind;
    use chrono::NaiveDate;

    fn env(id: &str, amount: f64) -> BudgetEnvelope {
        BudgetEnvelope {
            id: id.into(),
            name: id.to_uppercase(),
            budgeted_amount: amount,
        }
    }

    fn expense(id: &str, day: u32, month: u32, amount: f64, envelope: &str) -> Transaction {
        Transaction::new(
            id,
            NaiveDate::from_ymd_opt(2026, month, day).unwrap(),
            "spend",
            amount,
            TransactionKind::Expense,
            "Misc",
        )
        .with_envelope(envelope)
    }

    #[test]
    fn test_usage_counts_only_month_expenses() {
        let envelopes = vec![env("food", 1000.0), env("fun", 200.0), env("empty", 0.0)];
        let mut refund = expense("r", 3, 2, 999.0, "food");
        refund.kind = TransactionKind::Income;
        let txns = vec![
            expense("a", 1, 2, 500.0, "food"),
            expense("b", 2, 2, 350.0, "food"),
            expense("c", 2, 1, 400.0, "food"),
            expense("d", 4, 2, 250.0, "fun"),
            refund,
        ];
        let feb = YearMonth::new(2026, 2).unwrap();
        let usage = envelope_usage(&envelopes, &txns, feb);

        assert_eq!(usage[0].spent, 850.0);
        assert_eq!(usage[0].status, EnvelopeStatus::Warning);
        assert_eq!(usage[1].remaining, -50.0);
        assert_eq!(usage[1].status, EnvelopeStatus::Overspent);
        assert_eq!(usage[2].percent, 0.0);
        assert_eq!(usage[2].status, EnvelopeStatus::OnTrack);

        let summary = BudgetSummary::of(&usage);
        assert_eq!(summary.total_budgeted, 1200.0);
        assert_eq!(summary.total_spent, 1100.0);
        assert_eq!(summary.remaining(), 100.0);
    }
}
