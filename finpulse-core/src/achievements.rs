//! Milestone badges unlocked by using the tracker

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstTransaction,
    FirstBudget,
    FirstGoal,
    DebtSlayer,
    Investor,
}

impl AchievementKind {
    pub const ALL: [AchievementKind; 5] = [
        AchievementKind::FirstTransaction,
        AchievementKind::FirstBudget,
        AchievementKind::FirstGoal,
        AchievementKind::DebtSlayer,
        AchievementKind::Investor,
    ];
}

/// How many records of each kind exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordCounts {
    pub transactions: usize,
    pub envelopes: usize,
    pub goals: usize,
    pub debts: usize,
    pub investments: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Achievement {
    pub kind: AchievementKind,
    pub unlocked: bool,
}

/// Every achievement, in catalog order, with its unlock state
pub fn achievements(counts: &RecordCounts) -> Vec<Achievement> {
    AchievementKind::ALL
        .iter()
        .map(|&kind| {
            let n = match kind {
                AchievementKind::FirstTransaction => counts.transactions,
                AchievementKind::FirstBudget => counts.envelopes,
                AchievementKind::FirstGoal => counts.goals,
                AchievementKind::DebtSlayer => counts.debts,
                AchievementKind::Investor => counts.investments,
            };
            Achievement { kind, unlocked: n > 0 }
        })
        .collect()
}
