//! The `Entity` seam: every record kind the ledger stores, with its table and
//! validation rules.

use std::collections::BTreeMap;

use finpulse_core::{
    Asset, BudgetEnvelope, Debt, Goal, Investment, RecurringBill, Transaction,
};

use crate::error::{LedgerError, Result};
use crate::store::Ledger;

pub trait Entity: Clone {
    /// Human-readable record kind, used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);

    /// Field-level checks run before a record is stored
    fn validate(&self) -> Result<()>;

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self>;
    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self>;

    /// Checks against other records in the ledger
    fn check_references(&self, _ledger: &Ledger) -> Result<()> {
        Ok(())
    }

    /// Cleanup of records that point at a removed one
    fn on_remove(_ledger: &mut Ledger, _id: &str) {}
}

fn invalid(kind: &str, msg: impl std::fmt::Display) -> LedgerError {
    LedgerError::Validation(format!("{kind}: {msg}"))
}

fn non_negative(kind: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(invalid(kind, format!("{field} must be a finite number")));
    }
    if value < 0.0 {
        return Err(invalid(kind, format!("{field} must not be negative (got {value})")));
    }
    Ok(())
}

fn non_empty(kind: &str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(kind, format!("{field} is required")));
    }
    Ok(())
}

impl Entity for Transaction {
    const KIND: &'static str = "transaction";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_negative(Self::KIND, "amount", self.amount)?;
        non_empty(Self::KIND, "description", &self.description)?;
        non_empty(Self::KIND, "category", &self.category)
    }

    fn check_references(&self, ledger: &Ledger) -> Result<()> {
        match self.envelope_id.as_deref() {
            Some(env) if !ledger.envelopes.contains_key(env) => Err(LedgerError::NotFound {
                kind: BudgetEnvelope::KIND,
                id: env.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.transactions
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.transactions
    }
}

impl Entity for Debt {
    const KIND: &'static str = "debt";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_empty(Self::KIND, "name", &self.name)?;
        non_negative(Self::KIND, "total amount", self.total_amount)?;
        non_negative(Self::KIND, "interest rate", self.interest_rate)?;
        non_negative(Self::KIND, "minimum payment", self.minimum_payment)
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.debts
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.debts
    }
}

impl Entity for Goal {
    const KIND: &'static str = "goal";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_empty(Self::KIND, "name", &self.name)?;
        non_negative(Self::KIND, "target amount", self.target_amount)?;
        non_negative(Self::KIND, "current amount", self.current_amount)
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.goals
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.goals
    }
}

impl Entity for BudgetEnvelope {
    const KIND: &'static str = "envelope";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_empty(Self::KIND, "name", &self.name)?;
        non_negative(Self::KIND, "budgeted amount", self.budgeted_amount)
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.envelopes
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.envelopes
    }

    // Transactions survive, they just lose the link.
    fn on_remove(ledger: &mut Ledger, id: &str) {
        for t in ledger.transactions.values_mut() {
            if t.envelope_id.as_deref() == Some(id) {
                t.envelope_id = None;
            }
        }
    }
}

impl Entity for Investment {
    const KIND: &'static str = "investment";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_empty(Self::KIND, "name", &self.name)?;
        non_negative(Self::KIND, "quantity", self.quantity)?;
        non_negative(Self::KIND, "purchase price", self.purchase_price)?;
        non_negative(Self::KIND, "current price", self.current_price)
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.investments
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.investments
    }
}

impl Entity for RecurringBill {
    const KIND: &'static str = "bill";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_empty(Self::KIND, "name", &self.name)?;
        non_negative(Self::KIND, "amount", self.amount)?;
        if !(1..=31).contains(&self.due_day) {
            return Err(invalid(
                Self::KIND,
                format!("due day must be between 1 and 31 (got {})", self.due_day),
            ));
        }
        Ok(())
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.bills
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.bills
    }
}

impl Entity for Asset {
    const KIND: &'static str = "asset";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn validate(&self) -> Result<()> {
        non_empty(Self::KIND, "name", &self.name)?;
        non_negative(Self::KIND, "purchase price", self.purchase_price)?;
        non_negative(Self::KIND, "current value", self.current_value)
    }

    fn table(ledger: &Ledger) -> &BTreeMap<String, Self> {
        &ledger.assets
    }

    fn table_mut(ledger: &mut Ledger) -> &mut BTreeMap<String, Self> {
        &mut ledger.assets
    }
}
