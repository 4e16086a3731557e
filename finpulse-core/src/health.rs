//! Financial health scoring.
//!
//! Turns a [`FinancialSnapshot`] into a 0-100 score, a summary tier and up to three
//! prioritized tips. Everything here is pure: the same snapshot always yields the same
//! analysis, and no input makes it fail. Division guards substitute infinities, which
//! are sentinel values and not errors.
//!
//! Summaries and tips are tagged variants; turning them into display text is the
//! caller's job.

use serde::{Deserialize, Serialize};

/// Maximum number of tips returned by [`evaluate`]
pub const MAX_TIPS: usize = 3;

/// Aggregate figures the score is computed from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSnapshot {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub total_debt: f64,
    pub total_assets: f64,
}

impl FinancialSnapshot {
    pub fn new(monthly_income: f64, monthly_expenses: f64, total_debt: f64, total_assets: f64) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            total_debt,
            total_assets,
        }
    }

    /// `(income - expenses) / income`, or -inf without income
    pub fn savings_rate(&self) -> f64 {
        if self.monthly_income > 0.0 {
            (self.monthly_income - self.monthly_expenses) / self.monthly_income
        } else {
            f64::NEG_INFINITY
        }
    }

    /// `debt / assets`; +inf when there is debt but no assets, 0 when there is neither
    pub fn debt_to_asset_ratio(&self) -> f64 {
        if self.total_assets > 0.0 {
            self.total_debt / self.total_assets
        } else if self.total_debt > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }

    /// Months of expenses covered by assets, +inf without expenses
    pub fn emergency_fund_months(&self) -> f64 {
        if self.monthly_expenses > 0.0 {
            self.total_assets / self.monthly_expenses
        } else {
            f64::INFINITY
        }
    }

    fn has_cash_flow(&self) -> bool {
        self.monthly_income != 0.0 || self.monthly_expenses != 0.0
    }

    fn has_balances(&self) -> bool {
        self.total_debt > 0.0 || self.total_assets > 0.0
    }
}

/// Headline verdict attached to an analysis
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Summary {
    /// Balances exist but no income or expenses this month
    AddCashFlow,
    /// Nothing recorded at all
    AddTransactions,
    Excellent,
    OnTrack,
    RoomForImprovement,
    NeedsAttention,
}

impl Summary {
    /// Tier for a computed score
    pub fn for_score(score: u8) -> Self {
        match score {
            80.. => Summary::Excellent,
            60..=79 => Summary::OnTrack,
            40..=59 => Summary::RoomForImprovement,
            _ => Summary::NeedsAttention,
        }
    }
}

/// Advice shown under the score, in priority order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tip {
    // Onboarding when only balances are known
    RecordTransactions,
    CreateEnvelopes,
    SetFinancialGoal,
    // Onboarding for an empty ledger
    RecordIncome,
    RecordExpenses,
    DefineGoal,
    // Scored path
    DetailedBudget,
    AccelerateDebtPayoff,
    BuildEmergencyFund,
    AutomateInvestments,
    ReviewGoals,
    IncreaseIncome,
}

/// Colour band for a gauge rendering of the score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Poor,
    Fair,
    Healthy,
}

impl HealthBand {
    pub fn for_score(score: u8) -> Self {
        if score < 40 {
            HealthBand::Poor
        } else if score < 70 {
            HealthBand::Fair
        } else {
            HealthBand::Healthy
        }
    }
}

/// Ratios and sub-scores behind a computed score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub savings_rate: f64,
    pub debt_to_asset_ratio: f64,
    pub emergency_fund_months: f64,
    /// Out of 50
    pub savings_points: u8,
    /// Out of 30
    pub debt_points: u8,
    /// Out of 20
    pub emergency_points: u8,
}

impl ScoreBreakdown {
    fn from_snapshot(snapshot: &FinancialSnapshot) -> Self {
        let savings_rate = snapshot.savings_rate();
        let debt_to_asset_ratio = snapshot.debt_to_asset_ratio();
        let emergency_fund_months = snapshot.emergency_fund_months();
        Self {
            savings_rate,
            debt_to_asset_ratio,
            emergency_fund_months,
            savings_points: savings_points(savings_rate),
            debt_points: debt_points(debt_to_asset_ratio),
            emergency_points: emergency_points(emergency_fund_months),
        }
    }

    /// Sum of sub-scores, clamped to 5..=100
    pub fn total(&self) -> u8 {
        let raw = f64::from(self.savings_points)
            + f64::from(self.debt_points)
            + f64::from(self.emergency_points);
        raw.round().clamp(5.0, 100.0) as u8
    }
}

/// Result of [`evaluate`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialAnalysis {
    /// 0-100
    pub score: u8,
    pub summary: Summary,
    /// At most [`MAX_TIPS`], highest priority first
    pub tips: Vec<Tip>,
    /// Absent on the onboarding paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl FinancialAnalysis {
    pub fn band(&self) -> HealthBand {
        HealthBand::for_score(self.score)
    }
}

/// Score a snapshot.
pub fn evaluate(snapshot: &FinancialSnapshot) -> FinancialAnalysis {
    if !snapshot.has_cash_flow() {
        return if snapshot.has_balances() {
            FinancialAnalysis {
                score: 10,
                summary: Summary::AddCashFlow,
                tips: vec![Tip::RecordTransactions, Tip::CreateEnvelopes, Tip::SetFinancialGoal],
                breakdown: None,
            }
        } else {
            FinancialAnalysis {
                score: 0,
                summary: Summary::AddTransactions,
                tips: vec![Tip::RecordIncome, Tip::RecordExpenses, Tip::DefineGoal],
                breakdown: None,
            }
        };
    }

    let breakdown = ScoreBreakdown::from_snapshot(snapshot);
    let score = breakdown.total();

    FinancialAnalysis {
        score,
        summary: Summary::for_score(score),
        tips: select_tips(&breakdown, snapshot.total_debt),
        breakdown: Some(breakdown),
    }
}

fn savings_points(savings_rate: f64) -> u8 {
    if savings_rate >= 0.20 {
        50
    } else if savings_rate >= 0.10 {
        40
    } else if savings_rate >= 0.05 {
        30
    } else if savings_rate > 0.0 {
        20
    } else {
        5
    }
}

fn debt_points(debt_to_asset_ratio: f64) -> u8 {
    if debt_to_asset_ratio < 0.3 {
        30
    } else if debt_to_asset_ratio < 0.5 {
        20
    } else if debt_to_asset_ratio < 0.8 {
        10
    } else {
        5
    }
}

fn emergency_points(emergency_fund_months: f64) -> u8 {
    if emergency_fund_months >= 6.0 {
        20
    } else if emergency_fund_months >= 3.0 {
        15
    } else if emergency_fund_months >= 1.0 {
        10
    } else {
        5
    }
}

// Problems first, then general advice, then the income filler.
fn select_tips(b: &ScoreBreakdown, total_debt: f64) -> Vec<Tip> {
    let mut tips = Vec::with_capacity(MAX_TIPS);

    if b.savings_rate < 0.10 {
        tips.push(Tip::DetailedBudget);
    }
    if b.debt_to_asset_ratio > 0.5 && total_debt > 0.0 {
        tips.push(Tip::AccelerateDebtPayoff);
    }
    if b.emergency_fund_months < 3.0 {
        tips.push(Tip::BuildEmergencyFund);
    }

    if tips.len() < MAX_TIPS && b.savings_rate >= 0.10 {
        tips.push(Tip::AutomateInvestments);
    }
    if tips.len() < MAX_TIPS && b.debt_to_asset_ratio <= 0.5 {
        tips.push(Tip::ReviewGoals);
    }
    if tips.len() < MAX_TIPS {
        tips.push(Tip::IncreaseIncome);
    }

    tips.truncate(MAX_TIPS);
    tips
}
