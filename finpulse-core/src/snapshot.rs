//! Aggregation of raw records into the figures the health score needs.

use serde::{Deserialize, Serialize};

use crate::finance::{Asset, Debt, Investment, Transaction};
use crate::health::FinancialSnapshot;
use crate::time::YearMonth;

/// Income and expenses inside one calendar month
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCashFlow {
    pub income: f64,
    pub expenses: f64,
}

impl MonthlyCashFlow {
    pub fn for_month(transactions: &[Transaction], month: YearMonth) -> Self {
        transactions
            .iter()
            .filter(|t| month.contains(t.date))
            .fold(Self::default(), |mut acc, t| {
                if t.is_income() {
                    acc.income += t.amount;
                } else {
                    acc.expenses += t.amount;
                }
                acc
            })
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Everything owned and owed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetWorth {
    /// All-time income minus all-time expenses
    pub cash_balance: f64,
    pub investments_value: f64,
    pub physical_assets_value: f64,
    pub debts_total: f64,
}

impl NetWorth {
    pub fn compute(
        transactions: &[Transaction],
        investments: &[Investment],
        assets: &[Asset],
        debts: &[Debt],
    ) -> Self {
        Self {
            cash_balance: transactions.iter().map(Transaction::signed_amount).sum(),
            investments_value: investments.iter().map(|i| i.quantity * i.current_price).sum(),
            physical_assets_value: assets.iter().map(|a| a.current_value).sum(),
            debts_total: debts.iter().map(|d| d.total_amount).sum(),
        }
    }

    /// Cash + investments + physical assets
    pub fn total_assets(&self) -> f64 {
        self.cash_balance + self.investments_value + self.physical_assets_value
    }

    pub fn net_worth(&self) -> f64 {
        self.total_assets() - self.debts_total
    }
}

impl FinancialSnapshot {
    /// Build the scoring input from month cash flow and current balances.
    pub fn assemble(cash_flow: &MonthlyCashFlow, net_worth: &NetWorth) -> Self {
        Self {
            monthly_income: cash_flow.income,
            monthly_expenses: cash_flow.expenses,
            total_debt: net_worth.debts_total,
            total_assets: net_worth.total_assets(),
        }
    }
}
