//! Investment and physical asset valuation

use serde::{Deserialize, Serialize};

use crate::finance::{Asset, Investment};

impl Investment {
    pub fn market_value(&self) -> f64 {
        self.quantity * self.current_price
    }

    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.purchase_price
    }

    pub fn gain_loss(&self) -> f64 {
        self.market_value() - self.cost_basis()
    }

    /// Percent return on cost; 0 when nothing was paid
    pub fn performance_pct(&self) -> f64 {
        performance(self.gain_loss(), self.cost_basis())
    }
}

impl Asset {
    /// Current value minus purchase price
    pub fn appreciation(&self) -> f64 {
        self.current_value - self.purchase_price
    }
}

fn performance(gain: f64, cost: f64) -> f64 {
    if cost > 0.0 { gain / cost * 100.0 } else { 0.0 }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub total_cost: f64,
}

impl PortfolioSummary {
    pub fn of(investments: &[Investment]) -> Self {
        Self {
            total_value: investments.iter().map(Investment::market_value).sum(),
            total_cost: investments.iter().map(Investment::cost_basis).sum(),
        }
    }

    pub fn gain_loss(&self) -> f64 {
        self.total_value - self.total_cost
    }

    pub fn performance_pct(&self) -> f64 {
        performance(self.gain_loss(), self.total_cost)
    }
}
