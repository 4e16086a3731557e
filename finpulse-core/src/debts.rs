//! Debt payoff ordering (avalanche / snowball)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::finance::Debt;

/// Order in which debts should be attacked
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest interest rate first; minimizes total interest paid
    #[default]
    Avalanche,
    /// Smallest balance first; quickest wins
    Snowball,
}

impl PayoffStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoffStrategy::Avalanche => "avalanche",
            PayoffStrategy::Snowball => "snowball",
        }
    }
}

impl fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoffStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "avalanche" => Ok(PayoffStrategy::Avalanche),
            "snowball" => Ok(PayoffStrategy::Snowball),
            other => Err(anyhow::anyhow!(
                "unknown payoff strategy '{other}' (expected avalanche or snowball)"
            )),
        }
    }
}

/// Return a reordered copy of `debts` for the given strategy.
///
/// The input slice is left untouched. Debts that tie on the sort key keep their
/// relative input order.
pub fn prioritize(debts: &[Debt], strategy: PayoffStrategy) -> Vec<Debt> {
    let mut ordered = debts.to_vec();
    match strategy {
        PayoffStrategy::Avalanche => {
            ordered.sort_by(|a, b| b.interest_rate.total_cmp(&a.interest_rate))
        }
        PayoffStrategy::Snowball => {
            ordered.sort_by(|a, b| a.total_amount.total_cmp(&b.total_amount))
        }
    }
    ordered
}

/// Plan header figures
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtTotals {
    pub total_balance: f64,
    /// Per month
    pub total_minimum_payments: f64,
}

impl DebtTotals {
    pub fn of(debts: &[Debt]) -> Self {
        debts.iter().fold(Self::default(), |acc, d| Self {
            total_balance: acc.total_balance + d.total_amount,
            total_minimum_payments: acc.total_minimum_payments + d.minimum_payment,
        })
    }
}
