//! File-backed ledger: every record kind keyed by id, persisted as one JSON document.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use finpulse_core::{
    Achievement, Asset, BudgetEnvelope, Debt, EnvelopeUsage, FinancialSnapshot, Goal,
    Investment, MonthlyCashFlow, NetWorth, PayoffStrategy, RecordCounts, RecurringBill,
    Transaction, YearMonth, achievements, envelope_usage, prioritize,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::entity::Entity;
use crate::error::{LedgerError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub transactions: BTreeMap<String, Transaction>,
    #[serde(default)]
    pub goals: BTreeMap<String, Goal>,
    #[serde(default)]
    pub envelopes: BTreeMap<String, BudgetEnvelope>,
    #[serde(default)]
    pub debts: BTreeMap<String, Debt>,
    #[serde(default)]
    pub investments: BTreeMap<String, Investment>,
    #[serde(default)]
    pub bills: BTreeMap<String, RecurringBill>,
    #[serde(default)]
    pub assets: BTreeMap<String, Asset>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Ledger {
    /// Load a ledger file. A missing file is an empty ledger.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no ledger file yet, starting empty");
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path).map_err(|source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let ledger: Self = serde_json::from_str(&s).map_err(|source| LedgerError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            transactions = ledger.transactions.len(),
            debts = ledger.debts.len(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    /// Write the ledger as pretty JSON, replacing the file in one rename.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let io_err = |source| LedgerError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, path).map_err(io_err)?;
        debug!(path = %path.display(), "saved ledger");
        Ok(())
    }

    /// Insert or replace a record. An empty id gets a fresh one; the stored id is returned.
    pub fn upsert<T: Entity>(&mut self, mut record: T) -> Result<String> {
        record.validate()?;
        record.check_references(self)?;
        if record.id().trim().is_empty() {
            record.set_id(new_id());
        }
        let id = record.id().to_string();
        let replaced = T::table_mut(self).insert(id.clone(), record).is_some();
        info!(kind = T::KIND, id = %id, replaced, "saved record");
        Ok(id)
    }

    pub fn get<T: Entity>(&self, id: &str) -> Option<&T> {
        T::table(self).get(id)
    }

    /// All records of one kind, ordered by id
    pub fn records<T: Entity>(&self) -> Vec<T> {
        T::table(self).values().cloned().collect()
    }

    pub fn remove<T: Entity>(&mut self, id: &str) -> Result<T> {
        let removed = T::table_mut(self)
            .remove(id)
            .ok_or_else(|| LedgerError::NotFound {
                kind: T::KIND,
                id: id.to_string(),
            })?;
        T::on_remove(self, id);
        info!(kind = T::KIND, id = %id, "removed record");
        Ok(removed)
    }

    /// Add money to a goal; the saved amount stops at the target.
    pub fn add_goal_progress(&mut self, id: &str, amount: f64) -> Result<&Goal> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(LedgerError::Validation(format!(
                "goal progress must be a non-negative amount (got {amount})"
            )));
        }
        let goal = self.goals.get_mut(id).ok_or_else(|| LedgerError::NotFound {
            kind: Goal::KIND,
            id: id.to_string(),
        })?;
        *goal = goal.clone().with_progress(amount);
        info!(id = %id, current = goal.current_amount, "goal progress recorded");
        Ok(&*goal)
    }

    pub fn counts(&self) -> RecordCounts {
        RecordCounts {
            transactions: self.transactions.len(),
            envelopes: self.envelopes.len(),
            goals: self.goals.len(),
            debts: self.debts.len(),
            investments: self.investments.len(),
        }
    }

    pub fn achievements(&self) -> Vec<Achievement> {
        achievements(&self.counts())
    }

    pub fn net_worth(&self) -> NetWorth {
        NetWorth::compute(
            &self.records::<Transaction>(),
            &self.records::<Investment>(),
            &self.records::<Asset>(),
            &self.records::<Debt>(),
        )
    }

    pub fn cash_flow(&self, month: YearMonth) -> MonthlyCashFlow {
        MonthlyCashFlow::for_month(&self.records::<Transaction>(), month)
    }

    /// Scoring input for `month`
    pub fn snapshot(&self, month: YearMonth) -> FinancialSnapshot {
        FinancialSnapshot::assemble(&self.cash_flow(month), &self.net_worth())
    }

    pub fn envelope_usage(&self, month: YearMonth) -> Vec<EnvelopeUsage> {
        envelope_usage(
            &self.records::<BudgetEnvelope>(),
            &self.records::<Transaction>(),
            month,
        )
    }

    /// Debts in payoff order. Ties on the strategy's key fall back to name, then id.
    pub fn debt_plan(&self, strategy: PayoffStrategy) -> Vec<Debt> {
        let mut debts = self.records::<Debt>();
        debts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        prioritize(&debts, strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use finpulse_core::{AchievementKind, TransactionKind};

    fn feb(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, day).unwrap()
    }

    #[test]
    fn test_upsert_assigns_id_and_replaces() {
        let mut ledger = Ledger::default();
        let id = ledger.upsert(Debt::new("", "Card", 900.0, 12.0, 90.0)).unwrap();
        assert!(!id.is_empty());

        let mut debt = ledger.get::<Debt>(&id).unwrap().clone();
        debt.total_amount = 800.0;
        let same = ledger.upsert(debt).unwrap();
        assert_eq!(same, id);
        assert_eq!(ledger.debts.len(), 1);
        assert_eq!(ledger.debts[&id].total_amount, 800.0);
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut ledger = Ledger::default();
        let err = ledger.remove::<Asset>("nope").unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { kind: "asset", .. }));
    }

    #[test]
    fn test_transaction_must_reference_existing_envelope() {
        let mut ledger = Ledger::default();
        let t = Transaction::new("", feb(1), "Lunch", 30.0, TransactionKind::Expense, "Food")
            .with_envelope("missing");
        assert!(matches!(ledger.upsert(t), Err(LedgerError::NotFound { kind: "envelope", .. })));
    }

    #[test]
    fn test_removing_envelope_unlinks_transactions() {
        let mut ledger = Ledger::default();
        let env = ledger
            .upsert(BudgetEnvelope {
                id: String::new(),
                name: "Food".into(),
                budgeted_amount: 600.0,
            })
            .unwrap();
        let tx = ledger
            .upsert(
                Transaction::new("", feb(2), "Market", 120.0, TransactionKind::Expense, "Food")
                    .with_envelope(env.clone()),
            )
            .unwrap();

        ledger.remove::<BudgetEnvelope>(&env).unwrap();
        assert_eq!(ledger.transactions[&tx].envelope_id, None);
        assert_eq!(ledger.transactions.len(), 1);
    }

    #[test]
    fn test_goal_progress_capped() {
        let mut ledger = Ledger::default();
        let id = ledger
            .upsert(Goal {
                id: String::new(),
                name: "Laptop".into(),
                target_amount: 3000.0,
                current_amount: 2500.0,
                target_date: feb(28),
            })
            .unwrap();
        assert_eq!(ledger.add_goal_progress(&id, 1000.0).unwrap().current_amount, 3000.0);
        assert!(ledger.add_goal_progress(&id, -5.0).is_err());
        assert!(ledger.add_goal_progress("other", 5.0).is_err());
    }

    #[test]
    fn test_debt_plan_ties_ordered_by_name() {
        let mut ledger = Ledger::default();
        // ids sort opposite to names
        ledger.upsert(Debt::new("a", "Store card", 800.0, 9.0, 40.0)).unwrap();
        ledger.upsert(Debt::new("b", "Bank loan", 800.0, 9.0, 80.0)).unwrap();
        ledger.upsert(Debt::new("c", "Overdraft", 200.0, 12.0, 20.0)).unwrap();

        let names = |plan: Vec<Debt>| plan.into_iter().map(|d| d.name).collect::<Vec<_>>();
        assert_eq!(
            names(ledger.debt_plan(PayoffStrategy::Avalanche)),
            ["Overdraft", "Bank loan", "Store card"]
        );
        assert_eq!(
            names(ledger.debt_plan(PayoffStrategy::Snowball)),
            ["Overdraft", "Bank loan", "Store card"]
        );
    }

    #[test]
    fn test_snapshot_and_achievements() {
        let mut ledger = Ledger::default();
        ledger
            .upsert(Transaction::new("", feb(5), "Salary", 5000.0, TransactionKind::Income, "Salary"))
            .unwrap();
        ledger
            .upsert(Transaction::new("", feb(6), "Rent", 3500.0, TransactionKind::Expense, "Housing"))
            .unwrap();
        ledger.upsert(Debt::new("", "Loan", 2000.0, 2.0, 100.0)).unwrap();
        ledger
            .upsert(Asset {
                id: String::new(),
                name: "Savings bond".into(),
                kind: Default::default(),
                purchase_price: 8500.0,
                current_value: 8500.0,
            })
            .unwrap();

        let month = YearMonth::new(2026, 2).unwrap();
        let snap = ledger.snapshot(month);
        assert_eq!(snap, FinancialSnapshot::new(5000.0, 3500.0, 2000.0, 10000.0));

        let unlocked: Vec<_> = ledger
            .achievements()
            .into_iter()
            .filter(|a| a.unlocked)
            .map(|a| a.kind)
            .collect();
        assert_eq!(unlocked, vec![AchievementKind::FirstTransaction, AchievementKind::DebtSlayer]);
    }
}
