//! Finance record types: transactions, debts, goals, envelopes, investments, bills and assets.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display currency chosen by the user
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Currency {
    #[default]
    #[serde(rename = "BRL")]
    Brl,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Brl => "BRL",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BRL" => Ok(Currency::Brl),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(anyhow::anyhow!("unsupported currency: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl FromStr for TransactionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" | "credit" => Ok(TransactionKind::Income),
            "expense" | "despesa" | "debit" => Ok(TransactionKind::Expense),
            other => Err(anyhow::anyhow!("unknown transaction type: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[serde(rename = "credit-card")]
    CreditCard,
    #[default]
    #[serde(rename = "debit-card")]
    DebitCard,
    #[serde(rename = "bank-transfer")]
    BankTransfer,
    #[serde(rename = "pix")]
    Pix,
    #[serde(rename = "cash")]
    Cash,
}

impl PaymentMethod {
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit-card",
            PaymentMethod::DebitCard => "debit-card",
            PaymentMethod::BankTransfer => "bank-transfer",
            PaymentMethod::Pix => "pix",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace([' ', '_'], "-");
        match norm.as_str() {
            "credit-card" | "credit" => Ok(PaymentMethod::CreditCard),
            "debit-card" | "debit" => Ok(PaymentMethod::DebitCard),
            "bank-transfer" | "transfer" => Ok(PaymentMethod::BankTransfer),
            "pix" => Ok(PaymentMethod::Pix),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(anyhow::anyhow!("unknown payment method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Recurrence {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "yearly")]
    Yearly,
}

impl Recurrence {
    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::None => "none",
            Recurrence::Weekly => "weekly",
            Recurrence::Monthly => "monthly",
            Recurrence::Yearly => "yearly",
        }
    }
}

impl FromStr for Recurrence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "none" | "one-off" => Ok(Recurrence::None),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            "yearly" | "annual" => Ok(Recurrence::Yearly),
            other => Err(anyhow::anyhow!("unknown recurrence: {other}")),
        }
    }
}

/// A single income or expense entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Always non-negative; direction comes from `kind`
    pub amount: f64,
    pub date: NaiveDate,
    pub category: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub recurrence: Recurrence,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Budget envelope this expense counts against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_id: Option<String>,
}

impl Transaction {
    /// Create a new transaction with default payment method and no recurrence
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            date,
            category: category.into(),
            description: description.into(),
            kind,
            payment_method: PaymentMethod::default(),
            recurrence: Recurrence::default(),
            tags: Vec::new(),
            envelope_id: None,
        }
    }

    pub fn with_envelope(mut self, envelope_id: impl Into<String>) -> Self {
        self.envelope_id = Some(envelope_id.into());
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Positive for income, negative for expenses
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// An outstanding debt tracked for payoff planning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub id: String,
    pub name: String,
    /// Remaining principal balance
    pub total_amount: f64,
    /// Percent per month
    pub interest_rate: f64,
    pub minimum_payment: f64,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        total_amount: f64,
        interest_rate: f64,
        minimum_payment: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_amount,
            interest_rate,
            minimum_payment,
        }
    }
}

/// A savings goal with a target date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
}

/// A monthly spending limit; the spent amount is derived from transactions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetEnvelope {
    pub id: String,
    pub name: String,
    pub budgeted_amount: f64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum InvestmentKind {
    #[serde(rename = "stock")]
    Stock,
    #[serde(rename = "real-estate-fund")]
    RealEstateFund,
    #[serde(rename = "crypto")]
    Crypto,
    #[serde(rename = "fixed-income")]
    FixedIncome,
    #[default]
    #[serde(rename = "other")]
    Other,
}

impl FromStr for InvestmentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace([' ', '_'], "-");
        match norm.as_str() {
            "stock" | "share" => Ok(InvestmentKind::Stock),
            "real-estate-fund" | "reit" | "fii" => Ok(InvestmentKind::RealEstateFund),
            "crypto" => Ok(InvestmentKind::Crypto),
            "fixed-income" | "bond" => Ok(InvestmentKind::FixedIncome),
            "other" => Ok(InvestmentKind::Other),
            other => Err(anyhow::anyhow!("unknown investment type: {other}")),
        }
    }
}

/// A position in the investment portfolio
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: InvestmentKind,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
}

/// A bill or subscription due on a fixed day each month
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringBill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    /// 1-31
    pub due_day: u8,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AssetKind {
    #[serde(rename = "real-estate")]
    RealEstate,
    #[serde(rename = "vehicle")]
    Vehicle,
    #[default]
    #[serde(rename = "other")]
    Other,
}

impl FromStr for AssetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace([' ', '_'], "-");
        match norm.as_str() {
            "real-estate" | "property" | "house" => Ok(AssetKind::RealEstate),
            "vehicle" | "car" => Ok(AssetKind::Vehicle),
            "other" => Ok(AssetKind::Other),
            other => Err(anyhow::anyhow!("unknown asset type: {other}")),
        }
    }
}

/// A physical asset counted towards net worth
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: AssetKind,
    pub purchase_price: f64,
    pub current_value: f64,
}
